/// Shared widgets for the dashboard, edit and storefront screens

use iced::widget::{button, column, container, image, row, text, text_input, Column};
use iced::{Alignment, Element, Length};

use crate::state::data::Product;
use crate::state::image::{ImageStaging, PreviewRef};
use crate::state::sizes::{SizeField, SizeList};
use crate::{Message, Route};

/// A caption above an input.
pub fn labeled<'a>(
    label: &'a str,
    input: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    column![text(label).size(14), input.into()].spacing(4).into()
}

/// Editable width/height/price rows with add and remove controls.
///
/// The remove button is only offered while more than one row is present,
/// so the last row can be replaced but not deleted through the UI.
pub fn size_rows_editor(sizes: &SizeList) -> Element<'_, Message> {
    let mut rows = Column::new().spacing(8);
    let removable = sizes.len() > 1;

    for (i, size) in sizes.rows().iter().enumerate() {
        let mut controls = row![
            text_input("Width", &size.width)
                .on_input(move |v| Message::SizeEdited(i, SizeField::Width, v)),
            text_input("Height", &size.height)
                .on_input(move |v| Message::SizeEdited(i, SizeField::Height, v)),
            text_input("Price", &size.price)
                .on_input(move |v| Message::SizeEdited(i, SizeField::Price, v)),
        ]
        .spacing(8);

        if removable {
            controls = controls.push(button("Remove").on_press(Message::SizeRemoved(i)));
        }
        rows = rows.push(controls);
    }

    rows.push(button("+ Add size").on_press(Message::SizeAdded))
        .into()
}

/// File picker button plus the current preview.
///
/// A locally staged file renders from its preview cache file; a remote
/// link renders from the fetched thumbnail when available.
pub fn image_picker<'a>(
    staging: &'a ImageStaging,
    remote_thumb: Option<&image::Handle>,
) -> Element<'a, Message> {
    let mut section = Column::new()
        .spacing(8)
        .push(button("Choose image…").on_press(Message::ImagePicked));

    match staging.preview() {
        Some(PreviewRef::Local(handle)) => {
            section = section
                .push(image(image::Handle::from_path(handle.path())).width(240))
                .push(button("Remove image").on_press(Message::ImageCleared));
        }
        Some(PreviewRef::Remote(url)) => {
            let preview: Element<Message> = match remote_thumb {
                Some(handle) => image(handle.clone()).width(240).into(),
                None => text(url.as_str()).size(13).into(),
            };
            section = section
                .push(preview)
                .push(button("Remove image").on_press(Message::ImageCleared));
        }
        None => {
            section = section.push(text("No image selected yet").size(13));
        }
    }

    section.into()
}

/// One product in the storefront or dashboard grid. With `admin` set the
/// card carries edit and delete controls.
pub fn product_card<'a>(
    product: &'a Product,
    thumb: Option<&image::Handle>,
    admin: bool,
) -> Element<'a, Message> {
    let mut card = Column::new().spacing(6);

    if let Some(handle) = thumb {
        card = card.push(image(handle.clone()).width(Length::Fill));
    }

    card = card
        .push(text(&product.title).size(18))
        .push(text(&product.description).size(14));

    if !product.sizes.is_empty() {
        card = card.push(text("Sizes and prices:").size(13));
        for size in &product.sizes {
            card = card.push(
                text(format!(
                    "W {} × H {}: {}",
                    size.width, size.height, size.price
                ))
                .size(13),
            );
        }
    }

    if admin {
        card = card.push(
            row![
                button("Edit").on_press(Message::GoTo(Route::Edit(product.id.clone()))),
                button("Delete").on_press(Message::DeleteRequested(product.id.clone())),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    container(card)
        .padding(12)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}
