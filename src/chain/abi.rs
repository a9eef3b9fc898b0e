//! Contract interfaces consumed by the launcher

use alloy::sol;
use serde_json::{json, Value};

sol! {
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract CastLauncher {
        function getCastToken(string castHash) external view returns (address);
        function getLaunchCost() external view returns (uint256);
        function launch(
            string ticker,
            string name,
            string image,
            string castHash,
            address[] addresses,
            bytes signature
        ) external payable;
    }
}

sol! {
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    contract LaunchedToken {
        function symbol() external view returns (string);
        function image() external view returns (string);
    }
}

/// JSON ABI fragment for `launch`, attached to transaction descriptors so
/// wallets can decode the call and its revert reasons
pub fn launch_abi() -> Value {
    json!([{
        "type": "function",
        "name": "launch",
        "stateMutability": "payable",
        "inputs": [
            {"name": "ticker", "type": "string", "internalType": "string"},
            {"name": "name", "type": "string", "internalType": "string"},
            {"name": "image", "type": "string", "internalType": "string"},
            {"name": "castHash", "type": "string", "internalType": "string"},
            {"name": "addresses", "type": "address[]", "internalType": "address[]"},
            {"name": "signature", "type": "bytes", "internalType": "bytes"}
        ],
        "outputs": []
    }])
}
