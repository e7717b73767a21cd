use iced::widget::image;
use iced::{Element, Task, Theme};
use log::{debug, error, info, warn};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult};

mod api;
mod config;
mod error;
mod state;
mod ui;

use api::CatalogGateway;
use config::Config;
use state::data::Product;
use state::form::ProductForm;
use state::sizes::SizeField;
use state::submit::SubmitState;
use ui::dashboard::DashboardScreen;
use ui::edit::EditScreen;
use ui::signin::SignInScreen;
use ui::storefront::StorefrontScreen;

/// Main application state
struct CatalogAdmin {
    config: Config,
    gateway: CatalogGateway,
    screen: Screen,
}

/// The four screens of the application. Each owns its state; navigating
/// replaces the whole screen, dropping form state (and releasing any held
/// preview handle) with it.
enum Screen {
    SignIn(SignInScreen),
    Storefront(StorefrontScreen),
    Dashboard(DashboardScreen),
    Edit(EditScreen),
}

/// Navigation targets.
#[derive(Debug, Clone)]
pub enum Route {
    SignIn,
    Storefront,
    Dashboard,
    Edit(String),
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    GoTo(Route),
    /// Session check result; `false` bounces to sign-in
    AuthChecked(bool),

    // Sign-in screen
    UsernameChanged(String),
    IdNumberChanged(String),
    PasswordChanged(String),
    SignInSubmitted,
    SignInFinished(Result<(), String>),

    // Product list (storefront and dashboard)
    ProductsFetched(Result<Vec<Product>, String>),
    /// Card image bytes for one product id
    ThumbFetched(String, Result<Vec<u8>, String>),

    // Product form (dashboard create and edit)
    TitleChanged(String),
    DescriptionChanged(String),
    SizeAdded,
    SizeRemoved(usize),
    SizeEdited(usize, SizeField, String),
    ImagePicked,
    ImageCleared,
    FormSubmitted,
    SubmitFinished(Result<(), String>),

    // Dashboard deletes
    DeleteRequested(String),
    DeleteFinished(Result<(), String>),

    // Edit screen load
    ProductLoaded(Result<Product, String>),
    EditPreviewFetched(Result<Vec<u8>, String>),
}

impl CatalogAdmin {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // If this fails, we panic because the app cannot function without
        // its preview cache or HTTP client
        let config = Config::load()
            .expect("Failed to initialize preview cache directory. Check permissions and disk space.");
        let gateway = CatalogGateway::new(config.api_url.clone())
            .expect("Failed to build the HTTP client");

        info!("catalog admin pointed at {}", config.api_url);

        (
            CatalogAdmin {
                config,
                gateway,
                screen: Screen::SignIn(SignInScreen::default()),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::GoTo(route) => self.goto(route),

            Message::AuthChecked(authenticated) => {
                if !authenticated && !matches!(self.screen, Screen::SignIn(_)) {
                    warn!("not authenticated, returning to sign-in");
                    self.screen = Screen::SignIn(SignInScreen::default());
                }
                Task::none()
            }

            // ---------------- SIGN-IN ----------------
            Message::UsernameChanged(value) => {
                if let Screen::SignIn(screen) = &mut self.screen {
                    screen.credentials.username = value;
                }
                Task::none()
            }
            Message::IdNumberChanged(value) => {
                if let Screen::SignIn(screen) = &mut self.screen {
                    screen.credentials.id_number = value;
                }
                Task::none()
            }
            Message::PasswordChanged(value) => {
                if let Screen::SignIn(screen) = &mut self.screen {
                    screen.credentials.password = value;
                }
                Task::none()
            }
            Message::SignInSubmitted => {
                let gateway = self.gateway.clone();
                if let Screen::SignIn(screen) = &mut self.screen {
                    if !screen.submit.begin() {
                        return Task::none();
                    }
                    screen.notice = None;
                    let credentials = screen.credentials.clone();
                    return Task::perform(
                        async move {
                            gateway
                                .sign_in(&credentials)
                                .await
                                .map_err(|e| e.to_string())
                        },
                        Message::SignInFinished,
                    );
                }
                Task::none()
            }
            Message::SignInFinished(result) => {
                if let Screen::SignIn(screen) = &mut self.screen {
                    match result {
                        Ok(()) => {
                            screen.submit.finish(true);
                            return self.goto(Route::Storefront);
                        }
                        Err(e) => {
                            error!("sign-in failed: {}", e);
                            screen.submit.finish(false);
                            screen.notice = Some(format!("⚠️ Sign-in failed: {}", e));
                        }
                    }
                }
                Task::none()
            }

            // ---------------- PRODUCT LIST ----------------
            Message::ProductsFetched(result) => {
                match &mut self.screen {
                    Screen::Storefront(screen) => match result {
                        Ok(products) => {
                            screen.loading = false;
                            screen.products = products;
                            let pending = pending_thumbs(&screen.products, &screen.thumbs);
                            return self.thumb_tasks(pending);
                        }
                        Err(e) => {
                            error!("product fetch failed: {}", e);
                            screen.loading = false;
                            screen.error = Some("⚠️ Failed to load products".to_string());
                        }
                    },
                    Screen::Dashboard(screen) => match result {
                        Ok(products) => {
                            screen.loading_products = false;
                            screen.products = products;
                            let pending = pending_thumbs(&screen.products, &screen.thumbs);
                            return self.thumb_tasks(pending);
                        }
                        Err(e) => {
                            error!("product fetch failed: {}", e);
                            screen.loading_products = false;
                            screen.notice = Some(format!("⚠️ Failed to load products: {}", e));
                        }
                    },
                    _ => debug!("product list arrived after leaving the screen"),
                }
                Task::none()
            }
            Message::ThumbFetched(id, result) => {
                match result {
                    Ok(bytes) => {
                        let handle = image::Handle::from_bytes(bytes);
                        match &mut self.screen {
                            Screen::Storefront(screen) => {
                                screen.thumbs.insert(id, handle);
                            }
                            Screen::Dashboard(screen) => {
                                screen.thumbs.insert(id, handle);
                            }
                            _ => {}
                        }
                    }
                    Err(e) => warn!("thumbnail fetch failed for {}: {}", id, e),
                }
                Task::none()
            }

            // ---------------- PRODUCT FORM ----------------
            Message::TitleChanged(value) => {
                if let Some((form, _, _)) = self.form_parts() {
                    form.set_title(value);
                }
                Task::none()
            }
            Message::DescriptionChanged(value) => {
                if let Some((form, _, _)) = self.form_parts() {
                    form.set_description(value);
                }
                Task::none()
            }
            Message::SizeAdded => {
                if let Some((form, _, _)) = self.form_parts() {
                    form.sizes.append();
                }
                Task::none()
            }
            Message::SizeRemoved(index) => {
                if let Some((form, _, notice)) = self.form_parts() {
                    if let Err(e) = form.sizes.remove_at(index) {
                        error!("size removal contract violation: {}", e);
                        *notice = Some(format!("⚠️ {}", e));
                    }
                }
                Task::none()
            }
            Message::SizeEdited(index, field, value) => {
                if let Some((form, _, notice)) = self.form_parts() {
                    if let Err(e) = form.sizes.update(index, field, &value) {
                        error!("size update contract violation: {}", e);
                        *notice = Some(format!("⚠️ {}", e));
                    }
                }
                Task::none()
            }
            Message::ImagePicked => {
                // Modal native dialog; blocks the update loop briefly
                let picked = FileDialog::new()
                    .set_title("Select Product Image")
                    .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp", "bmp"])
                    .pick_file();

                if let Some(path) = picked {
                    if let Some((form, _, notice)) = self.form_parts() {
                        match form.image.stage(&path) {
                            Ok(()) => *notice = None,
                            Err(e) => {
                                error!("failed to stage {}: {}", path.display(), e);
                                *notice = Some(format!("⚠️ {}", e));
                            }
                        }
                    }
                }
                Task::none()
            }
            Message::ImageCleared => {
                if let Some((form, _, _)) = self.form_parts() {
                    form.image.clear();
                }
                Task::none()
            }
            Message::FormSubmitted => {
                let gateway = self.gateway.clone();
                let Some((form, submit, notice)) = self.form_parts() else {
                    return Task::none();
                };

                let violations = form.validate_for_submit();
                if !violations.is_empty() {
                    let joined = violations
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join("; ");
                    *notice = Some(format!("⚠️ {}", joined));
                    return Task::none();
                }
                if !submit.begin() {
                    return Task::none();
                }
                *notice = None;

                match form.serialize() {
                    Ok(payload) => {
                        let id = form.id().map(str::to_string);
                        Task::perform(
                            async move {
                                let result = match id {
                                    Some(id) => gateway.update(&id, payload).await,
                                    None => gateway.create(payload).await,
                                };
                                result.map_err(|e| e.to_string())
                            },
                            Message::SubmitFinished,
                        )
                    }
                    Err(e) => {
                        error!("failed to encode form payload: {}", e);
                        submit.finish(false);
                        *notice = Some(format!("⚠️ Failed to encode the form: {}", e));
                        Task::none()
                    }
                }
            }
            Message::SubmitFinished(result) => {
                let cache_dir = self.config.preview_cache_dir.clone();
                match &mut self.screen {
                    Screen::Dashboard(screen) => match result {
                        Ok(()) => {
                            screen.submit.finish(true);
                            screen.submit.reset();
                            // Fresh form; dropping the old one releases any
                            // staged preview
                            screen.form = ProductForm::new_create(cache_dir);
                            screen.notice = Some("✅ Product added".to_string());
                            screen.loading_products = true;
                            return self.fetch_products_task();
                        }
                        Err(e) => {
                            error!("create failed: {}", e);
                            screen.submit.finish(false);
                            screen.notice =
                                Some(format!("⚠️ Failed to save the product: {}", e));
                        }
                    },
                    Screen::Edit(screen) => match result {
                        Ok(()) => {
                            screen.submit.finish(true);
                            return self.goto(Route::Dashboard);
                        }
                        Err(e) => {
                            error!("update failed: {}", e);
                            screen.submit.finish(false);
                            screen.notice =
                                Some(format!("⚠️ Failed to update the product: {}", e));
                        }
                    },
                    _ => debug!("submit result arrived after leaving the form"),
                }
                Task::none()
            }

            // ---------------- DELETE ----------------
            Message::DeleteRequested(id) => {
                let confirmed = MessageDialog::new()
                    .set_title("Delete product")
                    .set_description("Are you sure you want to delete this product?")
                    .set_buttons(MessageButtons::YesNo)
                    .show();
                if !matches!(confirmed, MessageDialogResult::Yes) {
                    return Task::none();
                }

                let gateway = self.gateway.clone();
                Task::perform(
                    async move { gateway.remove(&id).await.map_err(|e| e.to_string()) },
                    Message::DeleteFinished,
                )
            }
            Message::DeleteFinished(result) => match result {
                Ok(()) => {
                    // Refresh only once the delete response is observed
                    if let Screen::Dashboard(screen) = &mut self.screen {
                        screen.loading_products = true;
                    }
                    self.fetch_products_task()
                }
                Err(e) => {
                    error!("delete failed: {}", e);
                    if let Screen::Dashboard(screen) = &mut self.screen {
                        screen.notice = Some(format!("⚠️ Failed to delete: {}", e));
                    }
                    Task::none()
                }
            },

            // ---------------- EDIT LOAD ----------------
            Message::ProductLoaded(result) => {
                let cache_dir = self.config.preview_cache_dir.clone();
                let gateway = self.gateway.clone();
                if let Screen::Edit(screen) = &mut self.screen {
                    match result {
                        Ok(product) => {
                            let link = product.image_link.clone();
                            screen.form = Some(ProductForm::new_edit(cache_dir, &product));
                            if !link.is_empty() {
                                return Task::perform(
                                    async move {
                                        gateway
                                            .fetch_image(&link)
                                            .await
                                            .map_err(|e| e.to_string())
                                    },
                                    Message::EditPreviewFetched,
                                );
                            }
                        }
                        Err(e) => {
                            error!("product load failed: {}", e);
                            screen.notice =
                                Some(format!("⚠️ Failed to load the product: {}", e));
                        }
                    }
                }
                Task::none()
            }
            Message::EditPreviewFetched(result) => {
                if let Screen::Edit(screen) = &mut self.screen {
                    match result {
                        Ok(bytes) => screen.remote_thumb = Some(image::Handle::from_bytes(bytes)),
                        Err(e) => warn!("remote preview fetch failed: {}", e),
                    }
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match &self.screen {
            Screen::SignIn(screen) => ui::signin::view(screen),
            Screen::Storefront(screen) => ui::storefront::view(screen),
            Screen::Dashboard(screen) => ui::dashboard::view(screen),
            Screen::Edit(screen) => ui::edit::view(screen),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Replace the current screen and kick off its entry fetches. Every
    /// guarded screen re-checks the session on entry.
    fn goto(&mut self, route: Route) -> Task<Message> {
        match route {
            Route::SignIn => {
                self.screen = Screen::SignIn(SignInScreen::default());
                Task::none()
            }
            Route::Storefront => {
                self.screen = Screen::Storefront(StorefrontScreen {
                    loading: true,
                    ..StorefrontScreen::default()
                });
                Task::batch([self.auth_check_task(), self.fetch_products_task()])
            }
            Route::Dashboard => {
                let mut screen = DashboardScreen::new(self.config.preview_cache_dir.clone());
                screen.loading_products = true;
                self.screen = Screen::Dashboard(screen);
                Task::batch([self.auth_check_task(), self.fetch_products_task()])
            }
            Route::Edit(id) => {
                self.screen = Screen::Edit(EditScreen::new(id.clone()));
                let gateway = self.gateway.clone();
                let load = Task::perform(
                    async move { gateway.fetch_one(&id).await.map_err(|e| e.to_string()) },
                    Message::ProductLoaded,
                );
                Task::batch([self.auth_check_task(), load])
            }
        }
    }

    fn auth_check_task(&self) -> Task<Message> {
        let guard = self.gateway.session_guard();
        Task::perform(async move { guard.check().await }, Message::AuthChecked)
    }

    fn fetch_products_task(&self) -> Task<Message> {
        let gateway = self.gateway.clone();
        Task::perform(
            async move { gateway.list().await.map_err(|e| e.to_string()) },
            Message::ProductsFetched,
        )
    }

    /// One fetch task per product image that is not cached yet.
    fn thumb_tasks(&self, pending: Vec<(String, String)>) -> Task<Message> {
        Task::batch(pending.into_iter().map(|(id, url)| {
            let gateway = self.gateway.clone();
            Task::perform(
                async move {
                    (
                        id,
                        gateway.fetch_image(&url).await.map_err(|e| e.to_string()),
                    )
                },
                |(id, result)| Message::ThumbFetched(id, result),
            )
        }))
    }

    /// The product form currently on screen, with its submission state and
    /// notice line. The edit screen has no form until its product loads.
    fn form_parts(
        &mut self,
    ) -> Option<(&mut ProductForm, &mut SubmitState, &mut Option<String>)> {
        match &mut self.screen {
            Screen::Dashboard(screen) => {
                Some((&mut screen.form, &mut screen.submit, &mut screen.notice))
            }
            Screen::Edit(screen) => match &mut screen.form {
                Some(form) => Some((form, &mut screen.submit, &mut screen.notice)),
                None => None,
            },
            _ => None,
        }
    }
}

/// Products whose card image still needs fetching.
fn pending_thumbs(
    products: &[Product],
    cached: &std::collections::HashMap<String, image::Handle>,
) -> Vec<(String, String)> {
    products
        .iter()
        .filter(|p| !p.image_link.is_empty() && !cached.contains_key(&p.id))
        .map(|p| (p.id.clone(), p.image_link.clone()))
        .collect()
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application(
        "Catalog Admin",
        CatalogAdmin::update,
        CatalogAdmin::view,
    )
    .theme(CatalogAdmin::theme)
    .centered()
    .run_with(CatalogAdmin::new)
}
