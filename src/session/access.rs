use super::SessionStore;
use crate::config::ApiConfig;

/// Decision for rendering credential-gated views.
///
/// `Loading` while the store's initial read is pending (callers show a
/// placeholder and take no redirect action), `Granted` when a credential is
/// present or the deployment is unrestricted, `LoginRequired` otherwise
/// (callers redirect to the login entry point and render nothing). Callers
/// re-evaluate whenever the credential or loading state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Loading,
    Granted,
    LoginRequired,
}

impl Access {
    pub fn evaluate(store: &SessionStore, config: &ApiConfig) -> Self {
        if store.is_loading() {
            return Access::Loading;
        }
        if config.is_unrestricted() || store.get().is_some() {
            return Access::Granted;
        }
        Access::LoginRequired
    }
}
