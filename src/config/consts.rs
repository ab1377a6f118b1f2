/// API version stamped on every compiled workflow document
pub const WORKFLOW_API_VERSION: &str = "argoproj.io/v1alpha1";
/// Kind stamped on every compiled workflow document
pub const WORKFLOW_KIND: &str = "Workflow";
/// Service account the engine runs product workflows under
pub const WORKFLOW_SERVICE_ACCOUNT: &str = "workflow";
/// Prefix of the workflow (and entrypoint template) name; the namespace is appended
pub const WORKFLOW_NAME_PREFIX: &str = "product-controller";

/// Default time-to-live of a finished workflow, in seconds
pub const DEFAULT_TTL_SECONDS: u64 = 600;
/// Worker count used by the CLI when none is given
pub const DEFAULT_WORKER_COUNT: u32 = 10;

/// One ingest step per this many workers
pub const WORKERS_PER_INGEST: u32 = 5;
/// One calibrator step per this many workers
pub const WORKERS_PER_CALIBRATOR: u32 = 4;

/// First three octets of the multicast groups handed to realtime daemons
pub const MULTICAST_PREFIX: &str = "239.23.9";
/// Port every multicast group is bound on
pub const MULTICAST_PORT: u16 = 6789;
/// Usable last-octet values (1..=254)
pub const MAX_MULTICAST_GROUPS: u32 = 254;

pub const TELSTATE_COMPONENT: &str = "telstate";
pub const INGEST_COMPONENT: &str = "ingest";
pub const CALIBRATOR_COMPONENT: &str = "calibrator";
pub const HEAD_COMPONENT: &str = "head";
pub const BATCH_SETUP_COMPONENT: &str = "batch_setup";
pub const BATCH_COMPONENT: &str = "batch";

/// Components every deployment must configure
pub const REQUIRED_COMPONENTS: [&str; 5] = [
    TELSTATE_COMPONENT,
    INGEST_COMPONENT,
    CALIBRATOR_COMPONENT,
    HEAD_COMPONENT,
    BATCH_SETUP_COMPONENT,
];
