//! Chrome shared by every list screen: filter bar, table, pagination and
//! the preferences panel.

use iced::widget::{
    Column, Row, Space, button, column, container, pick_list, row, text, text_input, toggler,
};
use iced::{Alignment, Element, Length};

use redactdesk_table::{
    ActionsLayout, CollectionState, ColumnDescriptor, Operation, PAGE_SIZE_OPTIONS, Preferences,
    Record,
};

use super::SEMIBOLD;
use crate::message::{ListKind, ListMessage, Message};
use crate::model::ListScreen;
use crate::style::widgets::{
    card_style, chip_button_style, ghost_button_style, input_style, palette, primary_button_style,
    row_button_selected_style, row_button_style, secondary_button_style, table_header_style,
};

/// Maps a row action to the message it triggers.
pub type ActionHandler<R> = fn(&str, &R) -> Option<Message>;

fn wrap(kind: ListKind) -> impl Fn(ListMessage) -> Message + Copy {
    move |message| Message::List(kind, message)
}

/// Title row with the header counter, e.g. "Folders (3)".
pub fn view_title<'a, R: Record>(
    title: String,
    screen: &'a ListScreen<R>,
    actions: Vec<Element<'a, Message>>,
) -> Element<'a, Message> {
    let p = palette::current();
    let counter = screen.list.header_counter(&screen.records);

    let mut bar = row![
        text(title).size(20).font(SEMIBOLD),
        text(counter).size(16).color(p.text_secondary),
        Space::new().width(Length::Fill),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    // An empty list shows its loading text in the placeholder instead.
    if screen.loading && !screen.records.is_empty() {
        bar = bar.push(text("Refreshing...").size(13).color(p.text_muted));
    }
    for action in actions {
        bar = bar.push(action);
    }
    bar.into()
}

/// Toolbar button; disabled when `on_press` is `None`.
pub fn toolbar_button(
    label: &str,
    on_press: Option<Message>,
    primary: bool,
) -> Element<'_, Message> {
    let style = if primary {
        primary_button_style
    } else {
        secondary_button_style
    };
    button(text(label).size(13))
        .padding([7, 14])
        .style(style)
        .on_press_maybe(on_press)
        .into()
}

/// Filter bar, active tokens and pagination. Hidden while the list is empty.
pub fn view_controls<'a, R: Record>(
    screen: &'a ListScreen<R>,
    kind: ListKind,
) -> Option<Element<'a, Message>> {
    if !screen.list.shows_controls(&screen.records) {
        return None;
    }
    let on = wrap(kind);
    let p = palette::current();

    let property = pick_list(
        screen.property_choices(),
        screen.draft.property.clone(),
        move |choice| on(ListMessage::PropertyChosen(choice)),
    )
    .placeholder("Property")
    .text_size(13)
    .padding([6, 10]);

    let operator = pick_list(
        screen.draft.operators(),
        Some(screen.draft.operator),
        move |op| on(ListMessage::OperatorChosen(op)),
    )
    .text_size(13)
    .padding([6, 10]);

    let value = text_input("Value", &screen.draft.value)
        .on_input(move |v| on(ListMessage::ValueChanged(v)))
        .on_submit(on(ListMessage::AddToken))
        .size(13)
        .padding([6, 10])
        .width(Length::Fixed(180.0))
        .style(input_style);

    let add = button(text("Add filter").size(13))
        .padding([6, 12])
        .style(secondary_button_style)
        .on_press_maybe(
            (screen.draft.property.is_some() && !screen.draft.value.trim().is_empty())
                .then(|| on(ListMessage::AddToken)),
        );

    let mut bar = row![property, operator, value, add]
        .spacing(8)
        .align_y(Alignment::Center);

    if screen.list.free_text_enabled() {
        bar = bar.push(Space::new().width(Length::Fixed(12.0)));
        bar = bar.push(
            text_input("Search", &screen.list.query().free_text)
                .on_input(move |v| on(ListMessage::FreeTextChanged(v)))
                .size(13)
                .padding([6, 10])
                .width(Length::Fixed(200.0))
                .style(input_style),
        );
    }

    bar = bar.push(Space::new().width(Length::Fill));
    if let Some(label) = screen.list.matches_label(&screen.records) {
        bar = bar.push(text(label).size(13).color(p.text_secondary));
    }
    bar = bar.push(view_pagination(screen, kind));
    bar = bar.push(
        button(text("\u{2699}").size(14))
            .padding([4, 8])
            .style(ghost_button_style)
            .on_press(on(ListMessage::OpenPreferences)),
    );

    let mut content = column![bar].spacing(8);
    if let Some(tokens) = view_tokens(screen, kind) {
        content = content.push(tokens);
    }
    if let Some(preferences) = &screen.editing_preferences {
        content = content.push(view_preferences(screen, preferences, kind));
    }
    Some(content.into())
}

fn view_tokens<'a, R: Record>(
    screen: &'a ListScreen<R>,
    kind: ListKind,
) -> Option<Element<'a, Message>> {
    let query = screen.list.query();
    if query.tokens.is_empty() {
        return None;
    }
    let on = wrap(kind);

    let mut chips: Vec<Element<'a, Message>> = Vec::new();
    for (index, token) in query.tokens.iter().enumerate() {
        let label = screen
            .list
            .columns()
            .get(&token.property_key)
            .map_or(token.property_key.as_str(), |c| c.header.as_str());
        chips.push(
            button(text(format!("{label} {} {}  \u{2715}", token.operator, token.value)).size(12))
                .padding([4, 10])
                .style(chip_button_style)
                .on_press(on(ListMessage::RemoveToken(index)))
                .into(),
        );
    }

    if query.tokens.len() > 1 {
        let operation = match query.operation {
            Operation::And => "Match all",
            Operation::Or => "Match any",
        };
        chips.push(
            button(text(operation).size(12))
                .padding([4, 10])
                .style(ghost_button_style)
                .on_press(on(ListMessage::ToggleOperation))
                .into(),
        );
    }

    chips.push(
        button(text("Clear filters").size(12))
            .padding([4, 10])
            .style(ghost_button_style)
            .on_press(on(ListMessage::ClearFilter))
            .into(),
    );

    Some(
        Row::with_children(chips)
            .spacing(6)
            .align_y(Alignment::Center)
            .into(),
    )
}

fn view_pagination<'a, R: Record>(
    screen: &'a ListScreen<R>,
    kind: ListKind,
) -> Element<'a, Message> {
    let on = wrap(kind);
    let pages = screen.list.derive(&screen.records).pages_count;
    let current = screen.list.pagination().current_page_index();

    let previous = button(text("\u{2039}").size(14))
        .padding([2, 8])
        .style(ghost_button_style)
        .on_press_maybe((current > 1).then(|| on(ListMessage::Page(current - 1))));
    let next = button(text("\u{203A}").size(14))
        .padding([2, 8])
        .style(ghost_button_style)
        .on_press_maybe((current < pages).then(|| on(ListMessage::Page(current + 1))));

    row![previous, text(format!("{current} / {pages}")).size(13), next]
        .spacing(4)
        .align_y(Alignment::Center)
        .into()
}

fn view_preferences<'a, R: Record>(
    screen: &'a ListScreen<R>,
    preferences: &'a Preferences,
    kind: ListKind,
) -> Element<'a, Message> {
    let on = wrap(kind);

    let page_size = row![
        text("Page size").size(13).width(Length::Fixed(120.0)),
        pick_list(
            PAGE_SIZE_OPTIONS.to_vec(),
            Some(preferences.page_size),
            move |size| on(ListMessage::PageSizeChosen(size)),
        )
        .text_size(13)
        .padding([4, 10]),
    ]
    .align_y(Alignment::Center);

    let mut columns = Column::new().spacing(6);
    for item in &preferences.content_display {
        let label = screen
            .list
            .columns()
            .get(&item.id)
            .map_or_else(|| item.id.clone(), |c| c.header.clone());
        let id = item.id.clone();
        columns = columns.push(
            toggler(item.visible)
                .label(label)
                .text_size(13)
                .on_toggle(move |visible| on(ListMessage::ColumnToggled(id.clone(), visible))),
        );
    }

    let buttons = row![
        Space::new().width(Length::Fill),
        button(text("Cancel").size(13))
            .padding([6, 14])
            .style(secondary_button_style)
            .on_press(on(ListMessage::CancelPreferences)),
        button(text("Confirm").size(13))
            .padding([6, 14])
            .style(primary_button_style)
            .on_press(on(ListMessage::ApplyPreferences)),
    ]
    .spacing(8);

    container(
        column![
            text("Preferences").size(15).font(SEMIBOLD),
            page_size,
            text("Visible columns").size(13).font(SEMIBOLD),
            columns,
            buttons,
        ]
        .spacing(12),
    )
    .padding(16)
    .width(Length::Fixed(360.0))
    .style(card_style)
    .into()
}

/// Placeholder for an empty list or a filter with no matches.
pub fn view_placeholder<'a, R: Record>(
    screen: &'a ListScreen<R>,
    kind: ListKind,
) -> Option<Element<'a, Message>> {
    let p = palette::current();

    if screen.loading && screen.records.is_empty() {
        return Some(centered(
            text(format!("Loading {}...", screen.list.title().to_lowercase()))
                .size(14)
                .color(p.text_secondary)
                .into(),
        ));
    }

    match screen.list.collection_state(&screen.records) {
        CollectionState::Populated => None,
        CollectionState::Empty => Some(centered(
            text(screen.list.empty_text())
                .size(15)
                .font(SEMIBOLD)
                .color(p.text_secondary)
                .into(),
        )),
        CollectionState::NoMatches => Some(centered(
            column![
                text("No matches").size(15).font(SEMIBOLD),
                button(text("Clear filter").size(13))
                    .padding([6, 14])
                    .style(secondary_button_style)
                    .on_press(Message::List(kind, ListMessage::ClearFilter)),
            ]
            .spacing(10)
            .align_x(Alignment::Center)
            .into(),
        )),
    }
}

fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    container(content)
        .padding(40)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into()
}

/// Renders the visible page as a table with sortable headers.
pub fn view_table<'a, R: Record>(
    screen: &'a ListScreen<R>,
    kind: ListKind,
    on_action: ActionHandler<R>,
) -> Element<'a, Message> {
    let on = wrap(kind);
    let p = palette::current();
    let columns = screen.list.visible_columns();

    let header: Vec<Element<'a, Message>> = columns
        .iter()
        .map(|column| {
            let label = text(screen.list.sort_label(&column.id))
                .size(13)
                .font(SEMIBOLD)
                .color(p.text_secondary);
            if column.sortable && !column.is_actions() {
                button(label)
                    .padding([4, 6])
                    .style(ghost_button_style)
                    .on_press(on(ListMessage::SortBy(column.id.clone())))
                    .width(Length::FillPortion(1))
                    .into()
            } else {
                container(label)
                    .padding([4, 6])
                    .width(Length::FillPortion(1))
                    .into()
            }
        })
        .collect();

    let mut table = Column::new().push(
        container(Row::with_children(header).spacing(8))
            .padding([6, 12])
            .style(table_header_style),
    );

    for record in screen.list.derive(&screen.records).visible_page {
        table = table.push(view_row(screen, &columns, record, kind, on_action));
    }

    table.spacing(2).into()
}

fn view_row<'a, R: Record>(
    screen: &'a ListScreen<R>,
    columns: &[&ColumnDescriptor<R>],
    record: &R,
    kind: ListKind,
    on_action: ActionHandler<R>,
) -> Element<'a, Message> {
    let p = palette::current();
    let disabled = screen.list.is_item_disabled(record);
    let selected = screen.list.is_selected(record);

    let cells: Vec<Element<'a, Message>> = columns
        .iter()
        .map(|column| {
            let cell: Element<'a, Message> = match column.actions_layout() {
                Some(layout) => view_actions(column, record, layout, on_action),
                None => text(column.render(record))
                    .size(13)
                    .color(if disabled { p.text_muted } else { p.text_primary })
                    .into(),
            };
            container(cell)
                .padding([2, 6])
                .width(Length::FillPortion(1))
                .into()
        })
        .collect();

    let style = if selected {
        row_button_selected_style
    } else {
        row_button_style
    };

    button(Row::with_children(cells).spacing(8).align_y(Alignment::Center))
        .width(Length::Fill)
        .padding([8, 12])
        .style(style)
        .on_press_maybe(
            (!disabled).then(|| Message::List(kind, ListMessage::Select(record.key()))),
        )
        .into()
}

fn view_actions<'a, R: Record>(
    column: &ColumnDescriptor<R>,
    record: &R,
    layout: ActionsLayout,
    on_action: ActionHandler<R>,
) -> Element<'a, Message> {
    let buttons: Vec<Element<'a, Message>> = column
        .actions
        .iter()
        .map(|action| {
            button(text((action.label)(record)).size(12))
                .padding([4, 10])
                .style(secondary_button_style)
                .on_press_maybe(on_action(&action.id, record))
                .into()
        })
        .collect();

    match layout {
        ActionsLayout::Single => Row::with_children(buttons).into(),
        ActionsLayout::Stack => Column::with_children(buttons).spacing(4).into(),
    }
}
