use std::collections::{HashMap, VecDeque};

use alloy_json_rpc::RpcError;
use alloy_primitives::{
    Address, Bytes, I256, Log, TxHash, TxKind, U256, address, aliases::I24, keccak256,
};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::{SolCall, SolEvent, SolValue};
use parking_lot::Mutex;

use crate::{
    providers::ChainGateway,
    types::{
        PoolState, SeederError, TxOutcome,
        contract_bindings::{IQuoter, IUniswapV3Factory, IUniswapV3Pool, SeedToken},
    },
};

pub const MOCK_SIGNER: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const MOCK_POOL: Address = address!("00000000000000000000000000000000000000c1");

/// One request that reached the gateway.
#[derive(Debug, Clone)]
pub struct SentTx {
    pub request: TransactionRequest,
    pub raw: bool,
    pub hash: TxHash,
}

impl SentTx {
    pub fn to(&self) -> Option<Address> {
        match self.request.to {
            Some(TxKind::Call(to)) => Some(to),
            _ => None,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self.request.to, Some(TxKind::Create))
    }

    pub fn input(&self) -> Bytes {
        self.request.input.input().cloned().unwrap_or_default()
    }

    pub fn decode<C: SolCall>(&self) -> Option<C> {
        C::abi_decode(&self.input()).ok()
    }
}

struct MockState {
    balance: U256,
    transaction_count: u64,
    sent: Vec<SentTx>,
    receipts: HashMap<TxHash, TxOutcome>,
    revert_next: bool,
    revert_swaps: bool,
    deploy_addresses: VecDeque<Address>,
    pool_address: Address,
    pools: HashMap<Address, PoolState>,
    allowances: HashMap<(Address, Address, Address), U256>,
    quote: Bytes,
}

/// In-memory [`ChainGateway`] that records every request and answers the
/// reads the workflow makes. Token, pool and quoter state is scripted by the
/// test and updated by the writes it observes.
pub struct MockGateway {
    signer: Address,
    state: Mutex<MockState>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            signer: MOCK_SIGNER,
            state: Mutex::new(MockState {
                balance: U256::from(10u8) * U256::from(1_000_000_000_000_000_000u64),
                transaction_count: 0,
                sent: Vec::new(),
                receipts: HashMap::new(),
                revert_next: false,
                revert_swaps: false,
                deploy_addresses: VecDeque::new(),
                pool_address: MOCK_POOL,
                pools: HashMap::new(),
                allowances: HashMap::new(),
                quote: Bytes::new(),
            }),
        }
    }

    pub fn set_transaction_count(&self, count: u64) {
        self.state.lock().transaction_count = count;
    }

    pub fn set_balance(&self, balance: U256) {
        self.state.lock().balance = balance;
    }

    /// Contract addresses handed out to the next deployments, in order.
    pub fn push_deploy_address(&self, address: Address) {
        self.state.lock().deploy_addresses.push_back(address);
    }

    /// Address reported in the `PoolCreated` log of the next `createPool`.
    pub fn set_pool_address(&self, address: Address) {
        self.state.lock().pool_address = address;
    }

    pub fn set_pool(&self, pool: PoolState) {
        self.state.lock().pools.insert(pool.address, pool);
    }

    pub fn set_allowance(&self, token: Address, spender: Address, amount: U256) {
        self.state
            .lock()
            .allowances
            .insert((token, self.signer, spender), amount);
    }

    /// Raw return data of every quoter call.
    pub fn set_quote_data(&self, data: Bytes) {
        self.state.lock().quote = data;
    }

    pub fn set_quote(&self, amount: U256) {
        self.set_quote_data(amount.abi_encode().into());
    }

    /// The next mined transaction gets a failed receipt.
    pub fn revert_next(&self) {
        self.state.lock().revert_next = true;
    }

    /// Every raw transaction gets a failed receipt.
    pub fn revert_raw_transactions(&self) {
        self.state.lock().revert_swaps = true;
    }

    pub fn sent(&self) -> Vec<SentTx> {
        self.state.lock().sent.clone()
    }

    pub fn sent_calls<C: SolCall>(&self) -> Vec<C> {
        self.sent().iter().filter_map(SentTx::decode::<C>).collect()
    }

    pub fn deployments(&self) -> Vec<SentTx> {
        self.sent().into_iter().filter(SentTx::is_create).collect()
    }

    fn mine(&self, request: TransactionRequest, raw: bool) -> TxHash {
        let mut state = self.state.lock();

        let hash = keccak256((state.sent.len() as u64).to_be_bytes());
        let from = request.from.unwrap_or(self.signer);
        let input = request.input.input().cloned().unwrap_or_default();

        let reverted = std::mem::take(&mut state.revert_next) || (raw && state.revert_swaps);
        let mut outcome =
            TxOutcome { tx_hash: hash, success: !reverted, contract_address: None, logs: vec![] };

        if !reverted {
            match request.to {
                Some(TxKind::Create) => {
                    outcome.contract_address = state.deploy_addresses.pop_front();
                }
                Some(TxKind::Call(to)) => {
                    if let Ok(call) = IUniswapV3Factory::createPoolCall::abi_decode(&input) {
                        let pool = state.pool_address;
                        let (token0, token1) = crate::types::sort_tokens(call.tokenA, call.tokenB);
                        state.pools.insert(
                            pool,
                            PoolState {
                                address: pool,
                                token0,
                                token1,
                                fee: call.fee.to::<u32>(),
                                tick_spacing: 10,
                                tick: 0,
                                sqrt_price_x96: U256::ZERO,
                                liquidity: 0,
                            },
                        );

                        let event = IUniswapV3Factory::PoolCreated {
                            token0,
                            token1,
                            fee: call.fee,
                            tickSpacing: I24::unchecked_from(10),
                            pool,
                        };
                        outcome.logs.push(Log { address: to, data: event.encode_log_data() });
                    } else if let Ok(call) = IUniswapV3Pool::initializeCall::abi_decode(&input) {
                        if let Some(pool) = state.pools.get_mut(&to) {
                            pool.sqrt_price_x96 = U256::from(call.sqrtPriceX96);
                        }
                    } else if let Ok(call) = SeedToken::approveCall::abi_decode(&input) {
                        state.allowances.insert((to, from, call.spender), call.amount);
                    }
                }
                None => {}
            }
        }

        state.transaction_count += 1;
        state.receipts.insert(hash, outcome);
        state.sent.push(SentTx { request, raw, hash });

        hash
    }
}

fn unexpected(what: &str) -> SeederError {
    SeederError::ChainRpc(RpcError::local_usage_str(what))
}

impl ChainGateway for MockGateway {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, SeederError> {
        Ok(self.mine(tx, false))
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, SeederError> {
        let state = self.state.lock();

        if let Ok(call) = SeedToken::allowanceCall::abi_decode(&data) {
            let amount = state
                .allowances
                .get(&(to, call.owner, call.spender))
                .copied()
                .unwrap_or_default();
            return Ok(amount.abi_encode().into());
        }
        if IQuoter::quoteExactInputSingleCall::abi_decode(&data).is_ok() {
            return Ok(state.quote.clone());
        }

        let pool = state
            .pools
            .get(&to)
            .ok_or_else(|| unexpected(&format!("no contract at {to}")))?;

        let encoded = if IUniswapV3Pool::slot0Call::abi_decode(&data).is_ok() {
            // narrow solidity ints share the 32-byte word layout of their 256-bit forms
            (
                pool.sqrt_price_x96,
                I256::unchecked_from(pool.tick),
                0u16,
                1u16,
                1u16,
                0u16,
                true,
            )
                .abi_encode_params()
        } else if IUniswapV3Pool::liquidityCall::abi_decode(&data).is_ok() {
            pool.liquidity.abi_encode()
        } else if IUniswapV3Pool::tickSpacingCall::abi_decode(&data).is_ok() {
            I256::unchecked_from(pool.tick_spacing).abi_encode()
        } else if IUniswapV3Pool::feeCall::abi_decode(&data).is_ok() {
            U256::from(pool.fee).abi_encode()
        } else if IUniswapV3Pool::token0Call::abi_decode(&data).is_ok() {
            pool.token0.abi_encode()
        } else if IUniswapV3Pool::token1Call::abi_decode(&data).is_ok() {
            pool.token1.abi_encode()
        } else {
            return Err(unexpected("unknown pool call"));
        };

        Ok(encoded.into())
    }

    async fn wait_for_transaction_receipt(&self, hash: TxHash) -> Result<TxOutcome, SeederError> {
        self.state
            .lock()
            .receipts
            .get(&hash)
            .cloned()
            .ok_or_else(|| unexpected("unknown transaction"))
    }

    async fn get_balance(&self, _: Address) -> Result<U256, SeederError> {
        Ok(self.state.lock().balance)
    }

    async fn get_transaction_count(&self, _: Address) -> Result<u64, SeederError> {
        Ok(self.state.lock().transaction_count)
    }

    async fn prepare_transaction_request(
        &self,
        mut tx: TransactionRequest,
    ) -> Result<TransactionRequest, SeederError> {
        tx.from = Some(tx.from.unwrap_or(self.signer));
        tx.chain_id = Some(tx.chain_id.unwrap_or(31337));
        tx.gas = Some(tx.gas.unwrap_or(1_000_000));
        tx.max_fee_per_gas = Some(tx.max_fee_per_gas.unwrap_or(2_000_000_000));
        tx.max_priority_fee_per_gas = Some(tx.max_priority_fee_per_gas.unwrap_or(1_000_000_000));
        Ok(tx)
    }

    /// Not a real signature, the request is carried through as json.
    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes, SeederError> {
        Ok(serde_json::to_vec(&tx)?.into())
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash, SeederError> {
        let tx: TransactionRequest = serde_json::from_slice(&raw)?;
        Ok(self.mine(tx, true))
    }
}
