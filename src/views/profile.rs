//! Profile view and editor

use std::sync::Arc;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::forms::ProfileForm;
use crate::notice::Notice;
use crate::types::UserProfile;

use super::or_absent;

pub struct ProfileView {
    client: Arc<ApiClient>,
    /// `None` when the profile could not be loaded
    pub profile: Option<UserProfile>,
}

impl ProfileView {
    pub async fn load(client: Arc<ApiClient>) -> Self {
        let profile = or_absent(client.fetch_profile().await, "profile");
        Self { client, profile }
    }

    /// Editor prefilled from the loaded profile, or blank
    pub fn form(&self) -> ProfileForm {
        self.profile
            .as_ref()
            .map(ProfileForm::from_profile)
            .unwrap_or_default()
    }

    pub async fn save(&mut self, form: &ProfileForm) -> Notice {
        match self.client.update_profile(&form.to_profile()).await {
            Ok(profile) => {
                info!("Profile updated");
                self.profile = Some(profile);
                Notice::success("Profile updated successfully!")
            }
            Err(e) => {
                warn!("Profile update failed: {}", e);
                Notice::error("Failed to update profile")
            }
        }
    }
}
