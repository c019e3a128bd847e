//! Forward and delete modals, drawn over the current screen.

use iced::widget::{
    Row, Space, button, center, column, container, mouse_area, opaque, row, stack, text,
    text_input,
};
use iced::{Alignment, Element, Length};

use redactdesk_core::form::CONFIRM_TEXT;
use redactdesk_core::{DeleteConfirmation, ForwardMessageForm};

use super::SEMIBOLD;
use crate::message::{DeleteMessage, ForwardMessage, Message};
use crate::style::widgets::{
    backdrop_style, chip_button_style, danger_button_style, dialog_style, input_style,
    invalid_input_style, palette, primary_button_style, secondary_button_style,
};

/// Draws `modal` centred over `base`; clicking the backdrop sends `on_blur`.
pub fn view_overlay<'a>(
    base: Element<'a, Message>,
    modal: Element<'a, Message>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base,
        opaque(
            mouse_area(center(opaque(modal)).style(backdrop_style)).on_press(on_blur)
        )
    ]
    .into()
}

/// Renders the forward modal.
pub fn view_forward_modal(form: &ForwardMessageForm) -> Element<'static, Message> {
    let p = palette::current();
    let pending = form.phase().is_pending();
    let error = form.error_for("email").or_else(|| form.error_for("emails"));

    let chips: Vec<Element<'static, Message>> = form
        .tokens()
        .iter()
        .enumerate()
        .map(|(index, address)| {
            button(text(format!("{address}  \u{2715}")).size(12))
                .padding([4, 10])
                .style(chip_button_style)
                .on_press(Message::Forward(ForwardMessage::RemoveRecipient(index)))
                .into()
        })
        .collect();

    let input = text_input("name@example.com", &form.input)
        .on_input(|s| Message::Forward(ForwardMessage::InputChanged(s)))
        .on_submit(Message::Forward(ForwardMessage::CommitInput))
        .padding(10)
        .size(14)
        .width(Length::Fill)
        .style(if error.is_some() {
            invalid_input_style
        } else {
            input_style
        });

    let mut content = column![
        text("Forward email").size(18).font(SEMIBOLD),
        text(format!("Case {}", form.case_id()))
            .size(12)
            .color(p.text_muted),
        text("Recipients").size(13).font(SEMIBOLD),
        input,
    ]
    .spacing(10);
    if !chips.is_empty() {
        content = content.push(Row::with_children(chips).spacing(6));
    }
    if let Some(error) = error {
        content = content.push(text(error.message()).size(12).color(p.danger));
    }

    let submit = button(text(if pending { "Forwarding..." } else { "Forward" }).size(14))
        .padding([8, 18])
        .style(primary_button_style)
        .on_press_maybe((!pending).then_some(Message::Forward(ForwardMessage::Submit)));

    content = content.push(dialog_buttons(
        (!pending).then_some(Message::Forward(ForwardMessage::Cancel)),
        submit.into(),
    ));
    dialog(content.into())
}

/// Renders the typed-confirmation delete modal.
pub fn view_delete_modal(confirmation: &DeleteConfirmation) -> Element<'static, Message> {
    let p = palette::current();
    let target = confirmation.target();
    let pending = confirmation.phase().is_pending();

    let mut content = column![
        text(target.action_label()).size(18).font(SEMIBOLD),
        text(target.prompt()).size(14),
    ]
    .spacing(10);
    if let Some(note) = target.note() {
        content = content.push(text(note).size(13).color(p.text_secondary));
    }

    content = content.push(
        text(format!("To confirm deletion, type \"{CONFIRM_TEXT}\" below."))
            .size(13)
            .color(p.text_secondary),
    );
    content = content.push(
        text_input(CONFIRM_TEXT, &confirmation.confirm)
            .on_input(|s| Message::Delete(DeleteMessage::ConfirmChanged(s)))
            .on_submit(Message::Delete(DeleteMessage::Submit))
            .padding(10)
            .size(14)
            .style(input_style),
    );

    let label = if pending {
        "Deleting...".to_string()
    } else {
        target.action_label()
    };
    let submit = button(text(label).size(14))
        .padding([8, 18])
        .style(danger_button_style)
        .on_press_maybe(
            confirmation
                .can_confirm()
                .then_some(Message::Delete(DeleteMessage::Submit)),
        );

    content = content.push(dialog_buttons(
        (!pending).then_some(Message::Delete(DeleteMessage::Cancel)),
        submit.into(),
    ));
    dialog(content.into())
}

/// Cancel is disabled while `cancel` is `None`.
fn dialog_buttons(
    cancel: Option<Message>,
    submit: Element<'static, Message>,
) -> Element<'static, Message> {
    row![
        Space::new().width(Length::Fill),
        button(text("Cancel").size(14))
            .padding([8, 18])
            .style(secondary_button_style)
            .on_press_maybe(cancel),
        submit,
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

fn dialog(content: Element<'static, Message>) -> Element<'static, Message> {
    container(content)
        .padding(24)
        .width(Length::Fixed(480.0))
        .style(dialog_style)
        .into()
}
