pub use super::email_change_token::Entity as EmailChangeToken;
pub use super::email_verification_token::Entity as EmailVerificationToken;
pub use super::password_change_token::Entity as PasswordChangeToken;
pub use super::refresh_token::Entity as RefreshToken;
pub use super::user::Entity as User;
pub use super::user_account::Entity as UserAccount;
pub use super::user_account_tx::Entity as UserAccountTx;
