pub mod agent;
pub mod sites;

pub use agent::{AgentRunner, BatchOutcome};
pub use sites::{NewSite, SiteService, SiteSummary, VerificationInstructions, DEFAULT_RUN_LIMIT};
