//! Create folder and create rule screens.

use iced::widget::{
    Column, Space, button, column, container, pick_list, row, scrollable, text, text_input,
};
use iced::{Alignment, Element, Length};

use redactdesk_core::{
    CreateFolderForm, CreateRuleForm, FieldCondition, RuleField, RuleLineItem, ValidationError,
};

use super::SEMIBOLD;
use crate::message::{FolderFormMessage, Message, RuleFormMessage};
use crate::model::FolderChoice;
use crate::style::widgets::{
    card_style, ghost_button_style, input_style, invalid_input_style, page_style, palette,
    primary_button_style, scrollable_style, secondary_button_style,
};

/// Renders the create folder screen.
pub fn view_create_folder(form: &CreateFolderForm) -> Element<'static, Message> {
    let pending = form.phase().is_pending();

    let name = labelled_input(
        "Name",
        "Folder name",
        &form.name,
        form.error_for("name"),
        |s| Message::CreateFolder(FolderFormMessage::NameChanged(s)),
    );
    let description = labelled_input(
        "Description (optional)",
        "What belongs in this folder",
        &form.description,
        None,
        |s| Message::CreateFolder(FolderFormMessage::DescriptionChanged(s)),
    );

    let buttons = form_buttons(
        "Create Folder",
        pending,
        Message::CreateFolder(FolderFormMessage::Submit),
        Message::CreateFolder(FolderFormMessage::Cancel),
    );

    page(
        "Create Folder",
        column![name, description].spacing(16).into(),
        buttons,
    )
}

/// Renders the create rule screen; `folders` feeds the target picker.
pub fn view_create_rule(
    form: &CreateRuleForm,
    folders: Vec<FolderChoice>,
) -> Element<'static, Message> {
    let p = palette::current();
    let pending = form.phase().is_pending();

    let description = labelled_input(
        "Description",
        "What the rule does",
        &form.description,
        form.error_for("description"),
        |s| Message::CreateRule(RuleFormMessage::DescriptionChanged(s)),
    );

    let selected = folders
        .iter()
        .find(|f| f.id.as_str() == form.folder_id)
        .cloned();
    let mut folder = column![
        text("Destination folder").size(13).font(SEMIBOLD),
        pick_list(folders, selected, |choice| {
            Message::CreateRule(RuleFormMessage::FolderChosen(choice))
        })
        .placeholder("Choose a folder")
        .text_size(14)
        .padding([8, 10])
        .width(Length::Fill),
    ]
    .spacing(6);
    if let Some(error) = form.error_for("folder_id") {
        folder = folder.push(error_text(error));
    }

    let mut conditions = Column::new()
        .spacing(8)
        .push(text("Filtering conditions").size(13).font(SEMIBOLD));
    for (index, item) in form.line_items.iter().enumerate() {
        conditions = conditions.push(view_line_item(index, item, form.line_items.len() > 1));
    }
    conditions = conditions.push(
        button(text("+ Add condition").size(13))
            .padding([6, 12])
            .style(ghost_button_style)
            .on_press(Message::CreateRule(RuleFormMessage::AddLineItem)),
    );
    if let Some(error) = form.error_for("conditions") {
        conditions = conditions.push(error_text(error));
    }

    let date_error = form.error_for("date_range");
    let mut dates = column![
        text("Date received (optional)").size(13).font(SEMIBOLD),
        row![
            date_input("Start YYYY-MM-DD", &form.date_range.start, date_error.is_some(), |s| {
                Message::CreateRule(RuleFormMessage::StartChanged(s))
            }),
            text("to").size(13).color(p.text_secondary),
            date_input("End YYYY-MM-DD", &form.date_range.end, date_error.is_some(), |s| {
                Message::CreateRule(RuleFormMessage::EndChanged(s))
            }),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(6);
    if let Some(error) = date_error {
        dates = dates.push(error_text(error));
    }

    let buttons = form_buttons(
        "Create Rule",
        pending,
        Message::CreateRule(RuleFormMessage::Submit),
        Message::CreateRule(RuleFormMessage::Cancel),
    );

    page(
        "Create Email Filtering Rule",
        column![description, folder, conditions, dates]
            .spacing(20)
            .into(),
        buttons,
    )
}

fn view_line_item(
    index: usize,
    item: &RuleLineItem,
    removable: bool,
) -> Element<'static, Message> {
    let field = item.field();

    let field_picker = pick_list(RuleField::SELECTABLE.to_vec(), field, move |f| {
        Message::CreateRule(RuleFormMessage::FieldChosen(index, f))
    })
    .placeholder("Field")
    .text_size(13)
    .padding([6, 10])
    .width(Length::Fixed(170.0));

    let conditions = field.map_or_else(Vec::new, |f| f.conditions().to_vec());
    let condition = FieldCondition::parse(&item.field_condition);
    let condition_picker = pick_list(conditions, condition, move |c| {
        Message::CreateRule(RuleFormMessage::ConditionChosen(index, c))
    })
    .placeholder("Condition")
    .text_size(13)
    .padding([6, 10])
    .width(Length::Fixed(140.0));

    let value = text_input("Value", &item.field_value)
        .on_input(move |s| Message::CreateRule(RuleFormMessage::ValueChanged(index, s)))
        .size(13)
        .padding([6, 10])
        .width(Length::Fill)
        .style(input_style);

    let mut line = row![field_picker, condition_picker, value]
        .spacing(8)
        .align_y(Alignment::Center);
    if removable {
        line = line.push(
            button(text("\u{2715}").size(13))
                .padding([4, 8])
                .style(ghost_button_style)
                .on_press(Message::CreateRule(RuleFormMessage::RemoveLineItem(index))),
        );
    }
    line.into()
}

fn labelled_input(
    label: &'static str,
    placeholder: &str,
    value: &str,
    error: Option<&ValidationError>,
    on_change: impl Fn(String) -> Message + 'static,
) -> Element<'static, Message> {
    let style = if error.is_some() {
        invalid_input_style
    } else {
        input_style
    };

    let mut field = column![
        text(label).size(13).font(SEMIBOLD),
        text_input(placeholder, value)
            .on_input(on_change)
            .padding(10)
            .size(14)
            .width(Length::Fill)
            .style(style),
    ]
    .spacing(6);
    if let Some(error) = error {
        field = field.push(error_text(error));
    }
    field.into()
}

fn date_input(
    placeholder: &str,
    value: &str,
    invalid: bool,
    on_change: impl Fn(String) -> Message + 'static,
) -> Element<'static, Message> {
    text_input(placeholder, value)
        .on_input(on_change)
        .padding(8)
        .size(13)
        .width(Length::Fixed(170.0))
        .style(if invalid {
            invalid_input_style
        } else {
            input_style
        })
        .into()
}

fn error_text(error: &ValidationError) -> Element<'static, Message> {
    let p = palette::current();
    text(error.message()).size(12).color(p.danger).into()
}

fn form_buttons(
    submit_label: &'static str,
    pending: bool,
    submit: Message,
    cancel: Message,
) -> Element<'static, Message> {
    let submit = button(text(if pending { "Submitting..." } else { submit_label }).size(14))
        .padding([8, 18])
        .style(primary_button_style)
        .on_press_maybe((!pending).then_some(submit));
    let cancel = button(text("Cancel").size(14))
        .padding([8, 18])
        .style(secondary_button_style)
        .on_press(cancel);

    row![Space::new().width(Length::Fill), cancel, submit]
        .spacing(10)
        .into()
}

fn page(
    title: &'static str,
    fields: Element<'static, Message>,
    buttons: Element<'static, Message>,
) -> Element<'static, Message> {
    let card = container(column![fields, buttons].spacing(24))
        .padding(24)
        .max_width(720.0)
        .style(card_style);

    container(
        scrollable(
            column![text(title).size(22).font(SEMIBOLD), card]
                .spacing(16)
                .padding(20),
        )
        .height(Length::Fill)
        .style(scrollable_style),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(page_style)
    .into()
}
