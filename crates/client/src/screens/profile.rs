//! Profile screen.

use core::fmt;

use pocket_store_core::User;

use crate::api::UserDirectory;
use crate::error::AppError;
use crate::session::SessionHolder;
use crate::storage::KeyValueStore;

use super::{Navigation, Route, record_navigation};

/// Entries of the profile menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileOption {
    MyData,
    Notifications,
    TermsOfUse,
    Products,
}

impl ProfileOption {
    /// Every option, in menu order.
    pub const ALL: [Self; 4] = [
        Self::MyData,
        Self::Notifications,
        Self::TermsOfUse,
        Self::Products,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MyData => "My data",
            Self::Notifications => "Notifications",
            Self::TermsOfUse => "Terms of use",
            Self::Products => "Products",
        }
    }
}

impl fmt::Display for ProfileOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of selecting a profile option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileAction {
    /// Move to another screen.
    Navigate(Route),
    /// Show a notice with this text and stay.
    Notice(&'static str),
}

/// Visibility of the logout confirmation dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LogoutDialog {
    #[default]
    Hidden,
    Shown,
}

/// Signed-in user's profile with the options menu and logout.
pub struct ProfileScreen<D, K> {
    sessions: SessionHolder<D, K>,
    user: User,
    logout_dialog: LogoutDialog,
}

impl<D: UserDirectory, K: KeyValueStore> ProfileScreen<D, K> {
    /// Open the profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotSignedIn` if nobody is signed in.
    pub fn new(sessions: SessionHolder<D, K>) -> Result<Self, AppError> {
        let user = sessions.current().ok_or(AppError::NotSignedIn)?.user;
        Ok(Self {
            sessions,
            user,
            logout_dialog: LogoutDialog::Hidden,
        })
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        self.user.full_name()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.user.email
    }

    /// Avatar image URL.
    #[must_use]
    pub fn avatar(&self) -> &str {
        &self.user.image
    }

    #[must_use]
    pub fn select(&self, option: ProfileOption) -> ProfileAction {
        match option {
            ProfileOption::Products => {
                record_navigation(Route::ProductList);
                ProfileAction::Navigate(Route::ProductList)
            }
            other => ProfileAction::Notice(other.label()),
        }
    }

    #[must_use]
    pub fn is_logout_dialog_shown(&self) -> bool {
        self.logout_dialog == LogoutDialog::Shown
    }

    pub fn request_logout(&mut self) {
        self.logout_dialog = LogoutDialog::Shown;
    }

    pub fn cancel_logout(&mut self) {
        self.logout_dialog = LogoutDialog::Hidden;
    }

    /// Sign out and return to the login screen.
    pub fn confirm_logout(&mut self) -> Navigation {
        self.sessions.logout();
        self.logout_dialog = LogoutDialog::Hidden;
        Navigation::to(Route::Login)
    }
}
