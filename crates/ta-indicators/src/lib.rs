//! Technical indicators over OHLCV bar series.
//!
//! This crate provides pure, deterministic implementations of:
//! - Moving averages (SMA, EMA, WMA, DEMA, TEMA)
//! - Momentum indicators (RSI, ROC, Momentum, MACD, Awesome Oscillator)
//! - Oscillators (Stochastic, Stochastic RSI, Williams %R, CCI)
//! - Volatility indicators (ATR, Bollinger Bands, Envelope)
//! - Trend indicators (ADX, Aroon, Parabolic SAR, Ichimoku)
//! - Volume indicators (OBV, CMF, MFI, VWAP)
//!
//! Outputs are front-truncated by each indicator's warm-up period and never
//! contain NaN: degenerate windows resolve to documented sentinel values.
//! Window kernels use SIMD through the `wide` crate.

pub mod ichimoku;
pub mod momentum;
pub mod moving_average;
pub mod oscillator;
pub mod simd;
pub mod smoothing;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use ichimoku::{Ichimoku, IchimokuOutput};
pub use momentum::{
    awesome_output, classify_awesome, AwesomeBar, AwesomeOscillator, Direction, Macd, MacdOutput,
    Momentum, Roc, Rsi,
};
pub use moving_average::{Dema, Ema, Sma, Tema, Wma};
pub use oscillator::{Cci, Stochastic, StochasticOutput, StochasticRsi, WilliamsR};
pub use smoothing::OffsetSeries;
pub use trend::{Adx, AdxOutput, Aroon, AroonOutput, ParabolicSar, ParabolicSarOutput};
pub use volatility::{Atr, BandOutput, BollingerBands, Envelope};
pub use volume::{Cmf, Mfi, Obv, Vwap};
