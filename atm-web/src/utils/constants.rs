//! Application constants

/// Amount moved by the deposit and withdraw buttons.
pub const DEFAULT_AMOUNT: u64 = 1;

// UI messages
pub const INSTALL_METAMASK: &str = "Please install MetaMask in order to use this ATM.";
pub const CONNECT_PROMPT: &str = "Please connect your MetaMask wallet";
pub const PROVIDER_REQUIRED: &str = "MetaMask wallet is required to connect";
