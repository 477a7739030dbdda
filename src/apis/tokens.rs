use alloy_primitives::Bytes;
use alloy_sol_types::SolConstructor;
use tracing::info;

use super::utils::deploy_request;
use crate::{
    providers::SignerApi,
    types::{SeederError, Token, TokenSpec, contract_bindings::SeedToken},
};

pub trait TokenApi: SignerApi {
    /// Deploys one ERC20 and blocks until it is mined. The whole supply is
    /// minted to the signer.
    async fn deploy_token(&self, creation_code: &Bytes, spec: &TokenSpec) -> Result<Token, SeederError> {
        let args = SeedToken::constructorCall {
            name: spec.name.clone(),
            symbol: spec.symbol.clone(),
            initialSupply: spec.supply,
        }
        .abi_encode();

        let init_code: Bytes = [creation_code.as_ref(), args.as_slice()].concat().into();
        let hash = self.submit(deploy_request(init_code)).await?;
        let outcome = self.confirm(hash).await?;

        let address = outcome.contract_address.ok_or(SeederError::Deployment(hash))?;
        info!(target: "pool_seeder::tokens", symbol = %spec.symbol, ?address, "deployed token");

        Ok(Token {
            address,
            name: spec.name.clone(),
            symbol: spec.symbol.clone(),
            total_supply: spec.supply,
        })
    }
}

impl<T: SignerApi> TokenApi for T {}

#[cfg(test)]
mod tests {
    use alloy_primitives::{U256, address};
    use alloy_sol_types::SolValue;

    use super::*;
    use crate::{providers::SignerSession, test_utils::MockGateway};

    #[tokio::test]
    async fn test_deploy_token_appends_constructor_args() {
        let gateway = MockGateway::new();
        let deployed = address!("00000000000000000000000000000000000000a1");
        gateway.push_deploy_address(deployed);
        let session = SignerSession::new(gateway).with_all_fillers();

        let code = Bytes::from_static(&[0x60, 0x80]);
        let spec = TokenSpec::new("Alpha", "ALPHA", U256::from(1_000u32));
        let token = session.deploy_token(&code, &spec).await.unwrap();

        assert_eq!(token.address, deployed);
        assert_eq!(token.total_supply, U256::from(1_000u32));

        let sent = session.gateway().deployments();
        assert_eq!(sent.len(), 1);
        let input = sent[0].input();
        assert_eq!(&input[..2], code.as_ref());

        let (name, symbol, supply) = <(String, String, U256)>::abi_decode_params(&input[2..]).unwrap();
        assert_eq!((name.as_str(), symbol.as_str(), supply), ("Alpha", "ALPHA", U256::from(1_000u32)));
    }

    #[tokio::test]
    async fn test_deploy_token_without_contract_address() {
        // no scripted address, the receipt comes back without one
        let session = SignerSession::new(MockGateway::new()).with_all_fillers();
        let spec = TokenSpec::new("Alpha", "ALPHA", U256::from(1u8));

        let err = session.deploy_token(&Bytes::from_static(&[0x00]), &spec).await.unwrap_err();
        assert!(matches!(err, SeederError::Deployment(_)));
    }
}
