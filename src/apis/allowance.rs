use alloy_primitives::{Address, TxHash};
use tracing::{debug, info};

use super::utils::call_request;
use crate::{
    providers::{ChainGateway, SignerApi},
    types::{AllowancePolicy, SeederError, Token, contract_bindings::SeedToken},
};

pub trait AllowanceApi: SignerApi {
    /// Approves every spender on every token whose current allowance fails
    /// `policy`. Each approval grants the token's total supply and is
    /// confirmed before the next pair is checked. Returns the approval hashes
    /// in submission order, empty when nothing needed approving.
    async fn ensure_allowances(
        &self,
        tokens: &[Token],
        spenders: &[Address],
        policy: AllowancePolicy,
    ) -> Result<Vec<TxHash>, SeederError> {
        let owner = self.signer_address();
        let mut approvals = Vec::new();

        for token in tokens {
            for &spender in spenders {
                let current = self
                    .gateway()
                    .read_contract(token.address, SeedToken::allowanceCall { owner, spender })
                    .await?;

                if policy.is_sufficient(current, token.total_supply) {
                    debug!(target: "pool_seeder::allowance", token = %token.symbol, ?spender, %current, "allowance already set");
                    continue;
                }

                let call = SeedToken::approveCall { spender, amount: token.total_supply };
                let hash = self.submit(call_request(token.address, call)).await?;
                self.confirm(hash).await?;

                info!(target: "pool_seeder::allowance", token = %token.symbol, ?spender, ?hash, "approved spender");
                approvals.push(hash);
            }
        }

        Ok(approvals)
    }
}

impl<T: SignerApi> AllowanceApi for T {}
