use crate::{
    api::{ApiError, CurrentUser},
    utils::storage as storage_utils,
};
use leptos::*;

const CURRENT_USER_KEY: &str = "current_user";

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<CurrentUser>,
    pub loading: bool,
}

impl AuthState {
    /// Identity used as `approverId` on every admin leave call.
    pub fn approver_id(&self) -> Result<String, ApiError> {
        self.user
            .as_ref()
            .map(|user| user.id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::unauthenticated("사용자 정보를 찾을 수 없습니다. 다시 로그인해 주세요."))
    }
}

fn load_stored_user() -> Option<CurrentUser> {
    match storage_utils::read_json::<CurrentUser>(CURRENT_USER_KEY) {
        Ok(user) => user,
        Err(err) => {
            log::warn!("stored session unavailable: {}", err);
            None
        }
    }
}

fn create_auth_context() -> AuthContext {
    create_signal(AuthState {
        user: load_stored_user(),
        loading: false,
    })
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}
