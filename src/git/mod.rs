pub mod changes;
pub mod provision;
pub mod publish;
pub mod remote;

pub use changes::{generate_commit_message, ChangeError, ChangeOutcome, ChangePublisher};
pub use provision::{CloneTarget, ProvisionError, TemplateProvisioner};
pub use publish::{GitIdentity, GitPublisher, PublishError};
pub use remote::AuthenticatedRemote;
