//! Navigation guard tests
//!
//! Run with: cargo test --test guard_tests

mod common;

use common::{memory_store, token_for, user};
use schoolmed::auth::guard::LOGIN_PATH;
use schoolmed::auth::{evaluate, GuardDecision, Route, SessionState, UserRole};

fn logged_in(role: UserRole) -> SessionState {
    let (store, _) = memory_store();
    store.initialize();
    let role_name = role.to_string();
    store
        .login(user("u-1", role), &token_for("u-1", &role_name, 3600))
        .unwrap();
    store.snapshot()
}

#[test]
fn test_pending_before_initialize() {
    let (store, _) = memory_store();
    assert_eq!(
        evaluate(&store.snapshot(), Some(&UserRole::Admin)),
        GuardDecision::Pending
    );
    assert_eq!(Route::AdminUsers.check(&store.snapshot()), GuardDecision::Pending);
}

#[test]
fn test_unauthenticated_redirects_to_login() {
    let (store, _) = memory_store();
    store.initialize();
    let decision = Route::NurseAppointments.check(&store.snapshot());
    assert_eq!(decision, GuardDecision::RedirectToLogin);
    assert_eq!(decision.target(), Some(LOGIN_PATH));
}

#[test]
fn test_parent_on_admin_route_goes_home() {
    let state = logged_in(UserRole::Parent);
    let decision = evaluate(&state, Some(&UserRole::Admin));
    assert_eq!(decision, GuardDecision::Redirect("/parent"));
    assert!(!decision.is_allowed());
}

#[test]
fn test_nurse_on_parent_route_goes_to_nurse_base() {
    let state = logged_in(UserRole::Nurse);
    let required: UserRole = "PARENT".parse().unwrap();
    let decision = evaluate(&state, Some(&required));
    assert_eq!(decision, GuardDecision::Redirect("/nurse"));
    assert_ne!(decision, GuardDecision::RedirectToLogin);
}

#[test]
fn test_admin_on_nurse_route_goes_to_admin_base() {
    let state = logged_in(UserRole::Admin);
    assert_eq!(
        Route::NurseMedicalEvents.check(&state),
        GuardDecision::Redirect("/admin")
    );
}

#[test]
fn test_matching_role_allows_every_route_in_its_section() {
    for (role, prefix) in [
        (UserRole::Admin, "/admin"),
        (UserRole::Nurse, "/nurse"),
        (UserRole::Parent, "/parent"),
    ] {
        let state = logged_in(role.clone());
        for route in Route::ALL.iter().filter(|r| r.path().starts_with(prefix)) {
            assert!(
                route.check(&state).is_allowed(),
                "{} should reach {}",
                role,
                route
            );
        }
    }
}

#[test]
fn test_unknown_role_gets_no_protected_content() {
    let state = logged_in(UserRole::Other("janitor".to_string()));
    assert_eq!(
        Route::AdminUsers.check(&state),
        GuardDecision::Forbidden
    );
    assert!(Route::Login.check(&state).is_allowed());
}

#[test]
fn test_decision_follows_logout() {
    let (store, _) = memory_store();
    store.initialize();
    store
        .login(user("p-1", UserRole::Parent), &token_for("p-1", "parent", 3600))
        .unwrap();
    assert!(Route::ParentChildren.check(&store.snapshot()).is_allowed());

    store.logout();
    assert_eq!(
        Route::ParentChildren.check(&store.snapshot()),
        GuardDecision::RedirectToLogin
    );
}
