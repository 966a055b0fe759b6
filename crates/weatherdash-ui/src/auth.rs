//! Placeholder sign-in. Accepts any non-empty e-mail and password; nothing is
//! checked, stored or sent anywhere.

use crate::display::Notice;

pub const SIGNED_OUT_LABEL: &str = "Login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

#[derive(Debug, Default)]
pub struct MockAuth {
    user: Option<String>,
}

impl MockAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name shown on the account button
    pub fn label(&self) -> &str {
        self.user.as_deref().unwrap_or(SIGNED_OUT_LABEL)
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Returns the notice to show and whether the user is now signed in.
    pub fn sign_in(&mut self, action: AuthAction, email: &str, password: &str) -> (Notice, bool) {
        if email.is_empty() || password.is_empty() {
            return (Notice::error("Please fill all fields"), false);
        }

        let local_part = email.split_once('@').map_or(email, |(local, _)| local);
        self.user = Some(local_part.to_string());
        tracing::info!(user = local_part, ?action, "Signed in");

        let message = match action {
            AuthAction::Login => "Login successful!",
            AuthAction::Register => "Registration successful!",
        };
        (Notice::success(message), true)
    }

    pub fn logout(&mut self) -> Notice {
        self.user = None;
        Notice::info("Logged out successfully")
    }
}
