/// Public storefront screen
///
/// Read-only product grid with a shortcut into the dashboard. The list is
/// fetched on entry; card images arrive as separate thumbnail fetches.

use iced::widget::{button, column, container, horizontal_space, image, row, scrollable, text, Column};
use iced::{Alignment, Element, Length};
use std::collections::HashMap;

use crate::state::data::Product;
use crate::{Message, Route};

use super::widgets::product_card;

#[derive(Default)]
pub struct StorefrontScreen {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    /// Fetched card images, keyed by product id
    pub thumbs: HashMap<String, image::Handle>,
}

pub fn view(screen: &StorefrontScreen) -> Element<'_, Message> {
    let header = row![
        text("🛍️ Product Store").size(28),
        horizontal_space(),
        button("Dashboard").on_press(Message::GoTo(Route::Dashboard)),
    ]
    .align_y(Alignment::Center);

    let mut grid = Column::new().spacing(12);
    if screen.loading {
        grid = grid.push(text("Loading products… ⏳"));
    } else if let Some(error) = &screen.error {
        grid = grid.push(text(error));
    } else if screen.products.is_empty() {
        grid = grid.push(text("No products yet"));
    } else {
        for product in &screen.products {
            grid = grid.push(product_card(
                product,
                screen.thumbs.get(&product.id),
                false,
            ));
        }
    }

    let content = column![
        header,
        text("Product catalog").size(20),
        scrollable(grid).height(Length::Fill),
    ]
    .spacing(16);

    container(content).padding(20).into()
}
