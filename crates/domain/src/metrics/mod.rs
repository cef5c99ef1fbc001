pub mod apy;
pub mod impermanent_loss;
