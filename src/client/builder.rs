use alloy::{
    network::AnyNetwork,
    providers::{DynProvider, Provider, ProviderBuilder, WsConnect},
};
use crate::errors::InitError;

/// Type-erased provider used for every chain connection
pub type AnyNetworkProvider = DynProvider<AnyNetwork>;

/// Connect to `rpc_url`
///
/// URLs starting with `http` use the HTTP transport; anything else is treated
/// as a WebSocket endpoint.
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use evm_balances::client::get_provider;
/// let provider = get_provider("https://eth.llamarpc.com").await?;
/// # Ok(())
/// # }
/// ```
pub async fn get_provider(rpc_url: &str) -> Result<AnyNetworkProvider, InitError> {
    let provider = if rpc_url.starts_with("http") {
        let url = rpc_url
            .parse()
            .map_err(|_| InitError::InvalidRpcUrl(format!("Failed to parse RPC URL {rpc_url}")))?;
        ProviderBuilder::new().network::<AnyNetwork>().connect_http(url).erased()
    } else {
        let ws_connect = WsConnect::new(rpc_url);
        ProviderBuilder::new()
            .network::<AnyNetwork>()
            .connect_ws(ws_connect)
            .await
            .map_err(|e| InitError::WsConnection(format!("{rpc_url}: {e}")))?
            .erased()
    };
    Ok(provider)
}
