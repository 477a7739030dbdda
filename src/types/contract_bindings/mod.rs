pub use uniswap_v3::*;
#[rustfmt::skip]
mod uniswap_v3 {
    alloy_sol_types::sol! {
        #[allow(missing_docs)]
        #[derive(Debug, PartialEq, Eq)]
        contract SeedToken {
            constructor(string name, string symbol, uint256 initialSupply);
            function allowance(address owner, address spender) external view returns (uint256);
            function approve(address spender, uint256 amount) external returns (bool);
        }

        #[allow(missing_docs)]
        #[derive(Debug, PartialEq, Eq)]
        contract IUniswapV3Factory {
            event PoolCreated(address indexed token0, address indexed token1, uint24 indexed fee, int24 tickSpacing, address pool);

            function createPool(address tokenA, address tokenB, uint24 fee) external returns (address pool);
        }

        #[allow(missing_docs)]
        #[derive(Debug, PartialEq, Eq)]
        contract IUniswapV3Pool {
            function initialize(uint160 sqrtPriceX96) external;
            function slot0() external view returns (uint160 sqrtPriceX96, int24 tick, uint16 observationIndex, uint16 observationCardinality, uint16 observationCardinalityNext, uint8 feeProtocol, bool unlocked);
            function liquidity() external view returns (uint128);
            function tickSpacing() external view returns (int24);
            function fee() external view returns (uint24);
            function token0() external view returns (address);
            function token1() external view returns (address);
        }

        #[allow(missing_docs)]
        #[derive(Debug, PartialEq, Eq)]
        contract INonfungiblePositionManager {
            struct MintParams {
                address token0;
                address token1;
                uint24 fee;
                int24 tickLower;
                int24 tickUpper;
                uint256 amount0Desired;
                uint256 amount1Desired;
                uint256 amount0Min;
                uint256 amount1Min;
                address recipient;
                uint256 deadline;
            }

            function mint(MintParams calldata params) external payable returns (uint256 tokenId, uint128 liquidity, uint256 amount0, uint256 amount1);
        }

        #[allow(missing_docs)]
        #[derive(Debug, PartialEq, Eq)]
        contract ISwapRouter02 {
            struct ExactInputSingleParams {
                address tokenIn;
                address tokenOut;
                uint24 fee;
                address recipient;
                uint256 amountIn;
                uint256 amountOutMinimum;
                uint160 sqrtPriceLimitX96;
            }

            function exactInputSingle(ExactInputSingleParams calldata params) external payable returns (uint256 amountOut);
        }

        #[allow(missing_docs)]
        #[derive(Debug, PartialEq, Eq)]
        contract IQuoter {
            function quoteExactInputSingle(address tokenIn, address tokenOut, uint24 fee, uint256 amountIn, uint160 sqrtPriceLimitX96) external returns (uint256 amountOut);
        }
    }
}
