pub mod wallets;

pub use wallets::WalletService;
