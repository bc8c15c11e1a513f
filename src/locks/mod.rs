mod account_locks;

pub use account_locks::AccountLocks;
