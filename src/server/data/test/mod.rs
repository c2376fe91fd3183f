mod one_time_token;
mod refresh_token;
mod user;
mod user_account;
mod user_account_tx;
