use mship_core::ConfigError;
use mship_kernel::KernelError;
use mship_net::NetError;
use mship_ops::PlanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("network error: {0}")]
    Net(#[from] NetError),

    #[error("fleet plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}

pub type SimResult<T> = Result<T, SimError>;
