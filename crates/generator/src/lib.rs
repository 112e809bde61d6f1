// Content pipeline: Markdown/JSON/feed sources -> normalized JSON for the frontend

pub mod assemble;
pub mod content;
pub mod emit;
pub mod frontmatter;
pub mod normalize;
pub mod pipeline;
pub mod reader;

pub use assemble::{Assembled, Rejected};
pub use emit::JsonEmitter;
pub use frontmatter::ContentRecord;
pub use pipeline::{
    BuildError, Built, ContentKind, PipelineError, PipelineReport, build, build_local,
    run_pipeline,
};
