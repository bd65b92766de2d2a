//! Application Layer
//!
//! Use cases and application services.

pub mod change_password;
pub mod config;
mod input;
pub mod login;
pub mod logout;
pub mod notification;
pub mod register;
pub mod resend_verification;
pub mod reset_password;
pub mod send_reset_link;
pub mod token;
pub mod verify_email;

// Re-exports
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use notification::AuthNotifier;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use resend_verification::{ResendOutcome, ResendVerificationUseCase};
pub use reset_password::{ResetPasswordInput, ResetPasswordUseCase};
pub use send_reset_link::SendResetLinkUseCase;
pub use token::{Authenticated, authenticate, issue_access_token};
pub use verify_email::{VerifyEmailOutput, VerifyEmailUseCase};
