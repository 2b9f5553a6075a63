pub mod channel;
pub mod library;
pub mod migration_report;
pub mod origin_server;
pub mod program;

pub use channel::{Channel, ChannelOffline, OfflineMode};
pub use library::{CustomShow, Filler};
pub use migration_report::{MigrationReportRow, MigrationSummary, NO_CHANNEL_NUMBER};
pub use origin_server::{
    normalize_address, OriginServer, OriginServerCreateRequest, OriginServerDeleteRequest,
    OriginServerUpdateRequest,
};
pub use program::{Program, ProgramType};
