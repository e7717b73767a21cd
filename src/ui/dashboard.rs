/// Admin dashboard screen
///
/// The create-product form (title, description, staged image, size rows)
/// above the current catalog, where each card offers edit and delete.
/// Submission is disabled while a request is in flight or while the
/// product list is still loading.

use iced::widget::{button, column, container, horizontal_space, image, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::state::data::Product;
use crate::state::form::ProductForm;
use crate::state::submit::SubmitState;
use crate::{Message, Route};

use super::widgets::{image_picker, labeled, product_card, size_rows_editor};

pub struct DashboardScreen {
    pub form: ProductForm,
    pub products: Vec<Product>,
    pub loading_products: bool,
    pub submit: SubmitState,
    pub notice: Option<String>,
    pub thumbs: HashMap<String, image::Handle>,
}

impl DashboardScreen {
    pub fn new(preview_cache_dir: PathBuf) -> Self {
        Self {
            form: ProductForm::new_create(preview_cache_dir),
            products: Vec::new(),
            loading_products: false,
            submit: SubmitState::default(),
            notice: None,
            thumbs: HashMap::new(),
        }
    }
}

pub fn view(screen: &DashboardScreen) -> Element<'_, Message> {
    let header = row![
        text("🛍️ Product Dashboard").size(28),
        horizontal_space(),
        button("Storefront").on_press(Message::GoTo(Route::Storefront)),
    ]
    .align_y(Alignment::Center);

    let submitting = screen.submit.is_submitting();
    let can_submit = !submitting && !screen.loading_products;

    let mut form = column![
        text("Add a new product").size(20),
        labeled(
            "Title *",
            iced::widget::text_input("Product title", screen.form.title())
                .on_input(Message::TitleChanged),
        ),
        labeled(
            "Description *",
            iced::widget::text_input("Product description", screen.form.description())
                .on_input(Message::DescriptionChanged),
        ),
        labeled("Image *", image_picker(&screen.form.image, None)),
        labeled("Sizes and prices *", size_rows_editor(&screen.form.sizes)),
        button(if submitting {
            "Submitting… ⏳"
        } else {
            "Add product"
        })
        .on_press_maybe(can_submit.then_some(Message::FormSubmitted))
        .padding(10),
    ]
    .spacing(12);

    if let Some(notice) = &screen.notice {
        form = form.push(text(notice).size(14));
    }

    let mut catalog = Column::new()
        .spacing(12)
        .push(text("Current products").size(20));
    if screen.loading_products {
        catalog = catalog.push(text("Loading products… ⏳"));
    } else {
        for product in &screen.products {
            catalog = catalog.push(product_card(
                product,
                screen.thumbs.get(&product.id),
                true,
            ));
        }
    }

    let content = column![
        header,
        container(form)
            .padding(16)
            .width(Length::Fill)
            .style(container::rounded_box),
        catalog,
    ]
    .spacing(20);

    scrollable(container(content).padding(20)).into()
}
