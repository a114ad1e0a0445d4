#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod ssr;

#[cfg(test)]
pub mod helpers {
    use crate::api::{CurrentUser, LeaveRequest, LeaveStatus};
    use crate::state::auth::AuthState;
    use chrono::NaiveDate;
    use leptos::*;

    pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    pub fn approver() -> CurrentUser {
        CurrentUser {
            id: "emp-admin".into(),
            name: "박관리".into(),
            department: Some("인사팀".into()),
            role: Some("admin".into()),
        }
    }

    pub fn provide_auth(
        user: Option<CurrentUser>,
    ) -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
        let (auth, set_auth) = create_signal(AuthState {
            user,
            loading: false,
        });
        provide_context((auth, set_auth));
        (auth, set_auth)
    }

    /// Leave request on 2025-01-06..07, requested 2025-01-02, in 개발팀.
    pub fn leave(id: &str, name: &str, status: LeaveStatus) -> LeaveRequest {
        LeaveRequest {
            id: id.into(),
            name: name.into(),
            department: "개발팀".into(),
            job_position: "대리".into(),
            leave_type: "연차".into(),
            start_date: date(2025, 1, 6),
            end_date: date(2025, 1, 7),
            status,
            is_cancel: 0,
            workdays_count: 2.0,
            reason: Some("개인 사유".into()),
            requested_date: date(2025, 1, 2),
            reject_message: None,
        }
    }
}
