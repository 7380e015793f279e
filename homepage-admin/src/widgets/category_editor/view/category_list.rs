use homepage_categories::{CategoryRow, MAX_DEPTH, SaveKind};
use iced::widget::{
    Column, button, column, container, row, scrollable, text, text_input,
};
use iced::{Element, Length, Padding, Theme, alignment};

use crate::widgets::category_editor::CategoryEditorViewModel;
use crate::widgets::category_editor::event::CategoryEditorEvent;
use crate::widgets::category_editor::state::BannerKind;

const PADDING: f32 = 16.0;
const SECTION_SPACING: f32 = 12.0;
const HEADER_FONT_SIZE: f32 = 20.0;
const HEADER_BUTTON_SPACING: f32 = 8.0;

const ROW_SPACING: f32 = 4.0;
const ROW_ITEM_SPACING: f32 = 8.0;
const ROW_INDENT: f32 = 24.0;
const ROW_FONT_SIZE: f32 = 14.0;
const ROW_INPUT_WIDTH: f32 = 240.0;
const ROW_BUTTON_FONT_SIZE: f32 = 12.0;
const COUNT_FONT_SIZE: f32 = 12.0;

/// Props for the category list view.
pub(crate) struct CategoryListProps<'a> {
    pub(crate) vm: CategoryEditorViewModel<'a>,
}

/// Render the header, status banner and category rows.
pub(crate) fn view(
    props: CategoryListProps<'_>,
) -> Element<'_, CategoryEditorEvent, Theme, iced::Renderer> {
    let vm = props.vm;
    let header = header(&vm);

    let mut content = Column::new().spacing(SECTION_SPACING).push(header);
    if let Some(banner) = banner(&vm) {
        content = content.push(banner);
    }

    let mut rows = Column::new().spacing(ROW_SPACING);
    if vm.rows.is_empty() {
        let placeholder = if vm.loading {
            "Loading categories..."
        } else {
            "No categories yet."
        };
        rows = rows.push(text(placeholder).size(ROW_FONT_SIZE));
    }
    for category in &vm.rows {
        rows = rows.push(category_row(&vm, *category));
    }

    content = content.push(scrollable(rows).height(Length::Fill));

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(PADDING)
        .into()
}

fn header<'a>(
    vm: &CategoryEditorViewModel<'a>,
) -> Element<'a, CategoryEditorEvent, Theme, iced::Renderer> {
    let busy = vm.loading || vm.editor.is_saving();
    let can_save = vm.editor.save_enabled() && !busy;

    let title = text(format!("Categories ({} posts)", vm.total_posts))
        .size(HEADER_FONT_SIZE);

    let add = button(text("Add"))
        .on_press_maybe((!busy).then_some(CategoryEditorEvent::AddRoot));
    let save = button(text("Save"))
        .style(button::success)
        .on_press_maybe(can_save.then_some(CategoryEditorEvent::Save));
    let reload = button(text("Reload"))
        .style(button::secondary)
        .on_press_maybe((!busy).then_some(CategoryEditorEvent::Reload));

    row![
        title,
        container(row![add, save, reload].spacing(HEADER_BUTTON_SPACING))
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Right),
    ]
    .align_y(alignment::Vertical::Center)
    .into()
}

fn banner<'a>(
    vm: &CategoryEditorViewModel<'a>,
) -> Option<Element<'a, CategoryEditorEvent, Theme, iced::Renderer>> {
    let banner = vm.banner?;
    let message = text(banner.message.as_str()).size(ROW_FONT_SIZE);
    let message = match banner.kind {
        BannerKind::Info => message.style(text::success),
        BannerKind::Error => message.style(text::danger),
    };

    Some(
        container(message)
            .width(Length::Fill)
            .padding(8)
            .style(container::rounded_box)
            .into(),
    )
}

fn category_row<'a>(
    vm: &CategoryEditorViewModel<'a>,
    category: CategoryRow<'a>,
) -> Element<'a, CategoryEditorEvent, Theme, iced::Renderer> {
    let node = category.node;
    let id = node.id();
    let busy = vm.loading || vm.editor.is_saving();

    let content = if vm.editor.is_editing(id) {
        let value = vm.draft(id).unwrap_or(node.name());
        let input = text_input("Category name", value)
            .on_input(move |value| CategoryEditorEvent::DraftChanged {
                id,
                value,
            })
            .on_submit(CategoryEditorEvent::Commit { id })
            .size(ROW_FONT_SIZE)
            .width(Length::Fixed(ROW_INPUT_WIDTH));

        row![
            input,
            small_button("OK", Some(CategoryEditorEvent::Commit { id })),
            small_button("Cancel", Some(CategoryEditorEvent::Cancel { id })),
        ]
    } else {
        let mut label = row![
            text(node.name()).size(ROW_FONT_SIZE),
            text(format!("({})", node.post_count()))
                .size(COUNT_FONT_SIZE)
                .style(text::secondary),
        ]
        .spacing(ROW_ITEM_SPACING)
        .align_y(alignment::Vertical::Center);
        if let Some(marker) = pending_marker(vm, category) {
            label = label.push(
                text(marker).size(COUNT_FONT_SIZE).style(text::primary),
            );
        }

        let mut actions = row![small_button(
            "Edit",
            (!busy).then_some(CategoryEditorEvent::Edit { id })
        )]
        .spacing(ROW_ITEM_SPACING);
        if category.depth + 1 < MAX_DEPTH {
            actions = actions.push(small_button(
                "Add child",
                (!busy).then_some(CategoryEditorEvent::AddChild {
                    parent_id: id,
                }),
            ));
        }
        actions = actions.push(
            small_button(
                "Delete",
                (!busy).then_some(CategoryEditorEvent::Delete { id }),
            )
            .style(button::danger),
        );

        row![label, actions]
    };

    let indent = ROW_INDENT * category.depth as f32;
    container(
        content
            .spacing(ROW_ITEM_SPACING)
            .align_y(alignment::Vertical::Center),
    )
    .padding(Padding::ZERO.left(indent))
    .into()
}

fn pending_marker(
    vm: &CategoryEditorViewModel<'_>,
    category: CategoryRow<'_>,
) -> Option<&'static str> {
    match vm.editor.pending().kind_of(category.node.id())? {
        SaveKind::Create => Some("new"),
        SaveKind::Update => Some("renamed"),
        SaveKind::Delete => None,
    }
}

fn small_button<'a>(
    label: &'a str,
    on_press: Option<CategoryEditorEvent>,
) -> button::Button<'a, CategoryEditorEvent, Theme, iced::Renderer> {
    button(text(label).size(ROW_BUTTON_FONT_SIZE))
        .padding([2, 8])
        .style(button::text)
        .on_press_maybe(on_press)
}
