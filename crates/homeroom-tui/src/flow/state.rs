//! Flow state for the sign-in gate.

use homeroom_core::auth::ResetRequest;

/// The active pre-authentication screen.
///
/// Each variant owns the whole state of its screen, so switching variants
/// discards the previous screen's partial input and transient messages.
#[derive(Debug, Clone)]
pub enum LoginFlow {
    /// Email and password entry.
    Login(LoginForm),
    /// Forced password change after a first-time sign-in.
    FirstTimePasswordChange(ChangePasswordForm),
    /// Password reset via an emailed token (entered through launch flags).
    TokenPasswordReset(ResetPasswordForm),
    /// Request a reset link by email.
    ForgotPassword(ForgotPasswordForm),
    /// The account is locked; sign-in is not possible right now.
    AccountLocked(LockedState),
}

impl LoginFlow {
    /// A blank sign-in form.
    pub fn login() -> Self {
        Self::Login(LoginForm::default())
    }

    /// A sign-in form with the email kept and a banner shown, used when
    /// returning from a completed password change or reset.
    pub fn login_with(email: String, notice: Option<String>) -> Self {
        Self::Login(LoginForm {
            email,
            notice,
            ..LoginForm::default()
        })
    }

    /// The forced password change screen. Keeps the just-verified email
    /// and temporary password so the change can re-authenticate without
    /// asking for them again.
    pub fn first_time(email: String, current_password: String) -> Self {
        Self::FirstTimePasswordChange(ChangePasswordForm {
            email,
            current_password,
            ..ChangePasswordForm::default()
        })
    }

    /// The emailed-token reset screen, pre-filled from launch flags.
    pub fn token_reset(request: ResetRequest) -> Self {
        Self::TokenPasswordReset(ResetPasswordForm {
            token: request.token,
            email: request.email,
            ..ResetPasswordForm::default()
        })
    }

    /// The forgot-password screen, pre-filled with the sign-in email.
    pub fn forgot(email: String) -> Self {
        Self::ForgotPassword(ForgotPasswordForm {
            email,
            ..ForgotPasswordForm::default()
        })
    }

    /// The locked-account screen.
    pub fn locked(reason: LockReason, message: String, countdown: Option<u32>) -> Self {
        Self::AccountLocked(LockedState {
            reason,
            message,
            countdown,
            unlock_requested: false,
        })
    }

    /// True while any request of the active screen is in flight.
    pub fn is_submitting(&self) -> bool {
        match self {
            Self::Login(form) => form.submitting,
            Self::FirstTimePasswordChange(form) => form.submitting,
            Self::TokenPasswordReset(form) => form.submitting,
            Self::ForgotPassword(form) => form.submitting,
            Self::AccountLocked(_) => false,
        }
    }
}

/// Focusable fields on the sign-in form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// State of the sign-in form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    /// Error from the last attempt (wrong password, network, ...).
    pub error: Option<String>,
    /// Banner shown after a completed change or reset.
    pub notice: Option<String>,
    pub submitting: bool,
}

/// Focusable fields on the password change and reset forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordField {
    #[default]
    New,
    Confirm,
}

/// State of the forced password change form.
///
/// `email` and `current_password` are carried over from the sign-in form
/// and are not editable here.
#[derive(Debug, Clone, Default)]
pub struct ChangePasswordForm {
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub focus: PasswordField,
    pub error: Option<String>,
    pub submitting: bool,
}

/// State of the emailed-token reset form.
///
/// `token` and `email` come from the reset link and are not editable;
/// the token is good for a single attempt.
#[derive(Debug, Clone, Default)]
pub struct ResetPasswordForm {
    pub token: String,
    pub email: String,
    pub new_password: String,
    pub confirm_password: String,
    pub focus: PasswordField,
    pub error: Option<String>,
    pub submitting: bool,
}

/// State of the forgot-password form.
#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
    pub error: Option<String>,
    /// Confirmation that a reset link was requested.
    pub notice: Option<String>,
    pub submitting: bool,
}

/// Why the account cannot sign in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockReason {
    /// Unlocks automatically; a countdown is running.
    Temporary,
    /// Requires administrator action, no automatic unlock.
    Admin,
    /// Locked for good as far as this client is concerned.
    Permanent,
}

/// State of the locked-account screen.
#[derive(Debug, Clone)]
pub struct LockedState {
    pub reason: LockReason,
    /// Explanation from the backend (or a default one).
    pub message: String,
    /// Seconds until automatic unlock. Only ever decreases; `None` for
    /// locks without a schedule.
    pub countdown: Option<u32>,
    /// The user asked the school office to review the lock.
    pub unlock_requested: bool,
}

impl LockedState {
    /// Whether the request-unlock key applies to this lock.
    pub fn can_request_unlock(&self) -> bool {
        self.reason != LockReason::Permanent
    }
}
