/// Sign-in screen
///
/// Username, ID number and password are posted to `/api/sign`; success
/// navigates to the storefront. Every guarded screen bounces back here
/// when the session check fails.

use iced::widget::{button, column, container, text, text_input, Column};
use iced::{Alignment, Element, Length};

use crate::api::Credentials;
use crate::state::submit::SubmitState;
use crate::Message;

use super::widgets::labeled;

#[derive(Default)]
pub struct SignInScreen {
    pub credentials: Credentials,
    pub submit: SubmitState,
    pub notice: Option<String>,
}

pub fn view(screen: &SignInScreen) -> Element<'_, Message> {
    let submitting = screen.submit.is_submitting();

    let mut card: Column<Message> = column![
        text("Sign In").size(32),
        labeled(
            "Username",
            text_input("Enter username", &screen.credentials.username)
                .on_input(Message::UsernameChanged),
        ),
        labeled(
            "ID number",
            text_input("Enter ID number", &screen.credentials.id_number)
                .on_input(Message::IdNumberChanged),
        ),
        labeled(
            "Password",
            text_input("Enter password", &screen.credentials.password)
                .secure(true)
                .on_input(Message::PasswordChanged),
        ),
        button(if submitting {
            "Signing in… ⏳"
        } else {
            "Sign in"
        })
        .on_press_maybe((!submitting).then_some(Message::SignInSubmitted))
        .padding(10),
    ]
    .spacing(16)
    .max_width(420)
    .align_x(Alignment::Center);

    if let Some(notice) = &screen.notice {
        card = card.push(text(notice).size(14));
    }

    container(card)
        .padding(40)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
