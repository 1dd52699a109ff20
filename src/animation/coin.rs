use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of the on/off decisions behind the random flicker.
pub trait Coin {
    /// One fair, independent draw.
    fn flip(&mut self) -> bool;
}

pub struct FairCoin<R = StdRng> {
    rng: R,
}

impl FairCoin<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> FairCoin<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Coin for FairCoin<R> {
    fn flip(&mut self) -> bool {
        self.rng.gen()
    }
}
