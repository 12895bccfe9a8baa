//! Sign-in state shared across the app.
//!
//! `AuthService` owns the current [`AuthState`] and publishes changes over a
//! watch channel. Views take an [`AuthSubscription`] and re-render whenever
//! the state flips; dropping the subscription detaches it.

use tokio::sync::watch;

use lingo_core::model::User;

/// Snapshot of the authentication state at a point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    /// The signed-in user, if any.
    pub user: Option<User>,
    /// True while the initial session lookup is still in flight.
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Clone)]
pub struct AuthService {
    tx: watch::Sender<AuthState>,
    profile: User,
}

impl AuthService {
    /// Create a service that signs in as `profile` on [`login`](Self::login).
    ///
    /// The state starts as loading with no user, mirroring a session lookup
    /// that has not resolved yet.
    #[must_use]
    pub fn new(profile: User) -> Self {
        let (tx, _rx) = watch::channel(AuthState {
            user: None,
            loading: true,
        });
        Self { tx, profile }
    }

    /// Resolve the initial session lookup.
    ///
    /// Clears the loading flag and installs `user` (or leaves the app signed
    /// out when `None`).
    pub fn resolve(&self, user: Option<User>) {
        self.tx.send_replace(AuthState {
            user,
            loading: false,
        });
    }

    /// Sign in as the configured profile.
    pub fn login(&self) {
        self.tx.send_replace(AuthState {
            user: Some(self.profile.clone()),
            loading: false,
        });
    }

    /// Sign out, keeping the service usable for a later login.
    pub fn sign_out(&self) {
        self.tx.send_replace(AuthState {
            user: None,
            loading: false,
        });
    }

    /// Current state without subscribing.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes. The subscription starts at the current
    /// state and observes every replacement until dropped.
    #[must_use]
    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

/// Handle on the auth state stream. Dropping it unsubscribes.
pub struct AuthSubscription {
    rx: watch::Receiver<AuthState>,
}

impl AuthSubscription {
    /// Latest published state.
    #[must_use]
    pub fn current(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    /// Wait for the next state change.
    ///
    /// Returns `None` once the owning [`AuthService`] has been dropped.
    pub async fn changed(&mut self) -> Option<AuthState> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}
