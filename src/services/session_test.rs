use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Mutex;

use super::*;
use crate::config::{DEFAULT_AUTH_TARGET, DEFAULT_NOTICE_TIMEOUT_MS};

/// How the mock SDK answers `setup`.
enum Answer {
    User(Option<User>),
    Fail,
    Unreachable,
}

struct MockIdentity {
    answer: Answer,
    logout_ok: bool,
    setups: Mutex<Vec<IdentitySetup>>,
    shown: Mutex<Vec<(String, AuthSurface)>>,
}

impl MockIdentity {
    fn new(answer: Answer) -> Self {
        Self { answer, logout_ok: true, setups: Mutex::new(Vec::new()), shown: Mutex::new(Vec::new()) }
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for MockIdentity {
    fn setup(
        &self,
        options: &IdentitySetup,
        on_success: crate::net::identity::SuccessCallback,
        on_error: crate::net::identity::ErrorCallback,
    ) -> Result<(), IdentityError> {
        self.setups.lock().unwrap().push(options.clone());
        match &self.answer {
            Answer::User(user) => on_success(user.clone()),
            Answer::Fail => on_error(IdentityError::Authentication("token expired".to_owned())),
            Answer::Unreachable => return Err(IdentityError::Unavailable("no sdk".to_owned())),
        }
        Ok(())
    }

    fn show_surface(&self, target: &str, surface: &AuthSurface) -> Result<(), IdentityError> {
        self.shown.lock().unwrap().push((target.to_owned(), surface.clone()));
        Ok(())
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        if self.logout_ok { Ok(()) } else { Err(IdentityError::Logout("network".to_owned())) }
    }
}

fn config() -> AppConfig {
    AppConfig {
        project_id: "proj-1".to_owned(),
        public_key: "pk".to_owned(),
        auth_target: DEFAULT_AUTH_TARGET.to_owned(),
        notice_timeout_ms: DEFAULT_NOTICE_TIMEOUT_MS,
    }
}

fn user() -> User {
    User { first_name: Some("Ada".to_owned()), ..User::default() }
}

/// Everything the bootstrapper emitted, in order.
#[derive(Debug, PartialEq)]
enum Step {
    Go(String),
    Session(SessionEvent),
}

type Log = Rc<RefCell<Vec<Step>>>;

fn recorders(log: &Log) -> (impl Fn(&str) + 'static, impl Fn(SessionEvent) + Clone + 'static) {
    let nav_log = log.clone();
    let session_log = log.clone();
    (
        move |to: &str| nav_log.borrow_mut().push(Step::Go(to.to_owned())),
        move |event: SessionEvent| session_log.borrow_mut().push(Step::Session(event)),
    )
}

fn run(answer: Answer, path: &str) -> Vec<Step> {
    let boot = SessionBootstrapper::new(Arc::new(MockIdentity::new(answer)), config());
    let log = Log::default();
    let (navigate, on_session) = recorders(&log);
    boot.start(Location::parse(path), navigate, on_session);
    log.take()
}

// =============================================================
// settle
// =============================================================

#[test]
fn settle_signed_in_honours_redirect() {
    let (decision, event) = settle(&Location::parse("/login?redirect=/tasks/5"), Some(user()));
    assert_eq!(decision, RouteDecision::Navigate("/tasks/5".to_owned()));
    assert_eq!(event, SessionEvent::SignedIn(user()));
}

#[test]
fn settle_signed_out_on_root_goes_to_login() {
    let (decision, event) = settle(&Location::parse("/"), None);
    assert_eq!(decision, RouteDecision::Navigate("/login".to_owned()));
    assert_eq!(event, SessionEvent::SignedOut);
}

// =============================================================
// start
// =============================================================

#[test]
fn start_registers_with_configured_options() {
    let identity = Arc::new(MockIdentity::new(Answer::User(None)));
    let boot = SessionBootstrapper::new(identity.clone(), config());
    boot.start(Location::parse("/signup"), |_: &str| {}, |_: SessionEvent| {});
    assert_eq!(
        identity.setups.lock().unwrap().as_slice(),
        [IdentitySetup {
            target: "#authentication".to_owned(),
            client_id: "proj-1".to_owned(),
            view: "both".to_owned(),
        }]
    );
}

#[test]
fn start_registers_only_once() {
    let identity = Arc::new(MockIdentity::new(Answer::User(None)));
    let boot = SessionBootstrapper::new(identity.clone(), config());
    boot.start(Location::parse("/login"), |_: &str| {}, |_: SessionEvent| {});
    boot.start(Location::parse("/login"), |_: &str| {}, |_: SessionEvent| {});
    assert_eq!(identity.setups.lock().unwrap().len(), 1);
}

#[test]
fn signed_in_on_login_goes_home_then_signs_in() {
    assert_eq!(
        run(Answer::User(Some(user())), "/login"),
        [
            Step::Session(SessionEvent::Initialized),
            Step::Go("/".to_owned()),
            Step::Session(SessionEvent::SignedIn(user())),
        ]
    );
}

#[test]
fn signed_in_on_app_path_stays() {
    assert_eq!(
        run(Answer::User(Some(user())), "/tasks/5"),
        [Step::Session(SessionEvent::Initialized), Step::Session(SessionEvent::SignedIn(user()))]
    );
}

#[test]
fn signed_out_on_signup_stays() {
    assert_eq!(
        run(Answer::User(None), "/signup"),
        [Step::Session(SessionEvent::Initialized), Step::Session(SessionEvent::SignedOut)]
    );
}

#[test]
fn signed_out_on_app_path_keeps_destination() {
    assert_eq!(
        run(Answer::User(None), "/tasks/5"),
        [
            Step::Session(SessionEvent::Initialized),
            Step::Go("/login?redirect=%2Ftasks%2F5".to_owned()),
            Step::Session(SessionEvent::SignedOut),
        ]
    );
}

#[test]
fn identity_failure_only_unblocks_the_shell() {
    assert_eq!(run(Answer::Fail, "/tasks/5"), [Step::Session(SessionEvent::Initialized)]);
    assert_eq!(run(Answer::Unreachable, "/"), [Step::Session(SessionEvent::Initialized)]);
}

// =============================================================
// show_surface / logout
// =============================================================

#[test]
fn show_surface_targets_the_mount_point() {
    let identity = Arc::new(MockIdentity::new(Answer::User(None)));
    let boot = SessionBootstrapper::new(identity.clone(), config());
    boot.show_surface(&AuthSurface::Signup);
    assert_eq!(identity.shown.lock().unwrap().as_slice(), [("#authentication".to_owned(), AuthSurface::Signup)]);
}

#[tokio::test]
async fn logout_clears_session_then_goes_to_login() {
    let boot = SessionBootstrapper::new(Arc::new(MockIdentity::new(Answer::User(None))), config());
    let log = Log::default();
    let (navigate, on_session) = recorders(&log);
    boot.logout(navigate, on_session).await.unwrap();
    assert_eq!(log.take(), [Step::Session(SessionEvent::SignedOut), Step::Go("/login".to_owned())]);
}

#[tokio::test]
async fn logout_failure_leaves_session_alone() {
    let identity = MockIdentity { logout_ok: false, ..MockIdentity::new(Answer::User(None)) };
    let boot = SessionBootstrapper::new(Arc::new(identity), config());
    let log = Log::default();
    let (navigate, on_session) = recorders(&log);
    let err = boot.logout(navigate, on_session).await.unwrap_err();
    assert_eq!(err, IdentityError::Logout("network".to_owned()));
    assert!(log.take().is_empty());
}
