/// Edit-product screen
///
/// Loads one product by id, shows a read-only review of its current state
/// above the pre-filled form, and navigates back to the dashboard once the
/// update lands.

use iced::widget::{button, column, container, horizontal_space, image, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};

use crate::state::form::ProductForm;
use crate::state::image::PreviewRef;
use crate::state::submit::SubmitState;
use crate::{Message, Route};

use super::widgets::{image_picker, labeled, size_rows_editor};

pub struct EditScreen {
    pub id: String,
    /// Present once the product fetch lands
    pub form: Option<ProductForm>,
    pub submit: SubmitState,
    pub notice: Option<String>,
    /// Fetched bytes of the product's current remote image
    pub remote_thumb: Option<image::Handle>,
}

impl EditScreen {
    pub fn new(id: String) -> Self {
        Self {
            id,
            form: None,
            submit: SubmitState::default(),
            notice: None,
            remote_thumb: None,
        }
    }
}

pub fn view(screen: &EditScreen) -> Element<'_, Message> {
    let header = row![
        text("✏️ Edit Product").size(28),
        horizontal_space(),
        button("Back to dashboard").on_press(Message::GoTo(Route::Dashboard)),
    ]
    .align_y(Alignment::Center);

    let body: Element<Message> = match &screen.form {
        None => {
            let message = screen
                .notice
                .as_deref()
                .unwrap_or("Loading product… ⏳");
            text(message).into()
        }
        Some(form) => edit_body(screen, form),
    };

    let content = column![header, body].spacing(20);
    scrollable(container(content).padding(20)).into()
}

fn edit_body<'a>(screen: &'a EditScreen, form: &'a ProductForm) -> Element<'a, Message> {
    let submitting = screen.submit.is_submitting();

    // Read-only review of the product as currently filled in
    let mut review = column![
        text("Current product").size(20),
        text(format!("Title: {}", form.title())).size(14),
        text(format!("Description: {}", form.description())).size(14),
    ]
    .spacing(6);
    for size in form.sizes.rows() {
        review = review.push(
            text(format!("W {} × H {}: {}", size.width, size.height, size.price)).size(13),
        );
    }
    if let Some(preview) = current_preview(screen, form) {
        review = review.push(preview);
    }

    let mut editor = column![
        text("Edit product").size(20),
        labeled(
            "Title",
            iced::widget::text_input("Product title", form.title())
                .on_input(Message::TitleChanged),
        ),
        labeled(
            "Description",
            iced::widget::text_input("Product description", form.description())
                .on_input(Message::DescriptionChanged),
        ),
        labeled("Sizes and prices", size_rows_editor(&form.sizes)),
        labeled("Image", image_picker(&form.image, screen.remote_thumb.as_ref())),
        button(if submitting {
            "Updating… ⏳"
        } else {
            "Save changes"
        })
        .on_press_maybe((!submitting).then_some(Message::FormSubmitted))
        .padding(10),
    ]
    .spacing(12);

    if let Some(notice) = &screen.notice {
        editor = editor.push(text(notice).size(14));
    }

    let cards: Column<Message> = column![
        container(review)
            .padding(16)
            .width(Length::Fill)
            .style(container::rounded_box),
        container(editor)
            .padding(16)
            .width(Length::Fill)
            .style(container::rounded_box),
    ]
    .spacing(16);

    cards.into()
}

/// Small preview image for the review section, whichever reference the
/// staging currently holds.
fn current_preview<'a>(
    screen: &'a EditScreen,
    form: &'a ProductForm,
) -> Option<Element<'a, Message>> {
    match form.image.preview()? {
        PreviewRef::Local(handle) => {
            Some(image(image::Handle::from_path(handle.path())).width(120).into())
        }
        PreviewRef::Remote(_) => screen
            .remote_thumb
            .as_ref()
            .map(|handle| image(handle.clone()).width(120).into()),
    }
}
