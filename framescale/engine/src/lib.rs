/*!
    Scaling engine boundary for the framescale crate ecosystem.

    The conversion core treats the pixel engine as an opaque capability: it
    can say which formats it handles, build a conversion context for a fixed
    (geometry, format) tuple, and run the transform over bound buffers. That
    capability is the [`ScaleEngine`] trait; [`SoftwareEngine`] is the
    pure-Rust implementation shipped with this workspace.

    Contexts and frame descriptors are plain owned values: dropping the
    converter that holds them releases everything, and no free/teardown
    calls appear anywhere in the API.

    # Initialization

    [`init`] is the process-wide one-time setup. Call it once at pipeline
    startup, before constructing converters:

    ```
    framescale_engine::init();
    ```

    It is idempotent and cheap to call again.
*/

use std::sync::Once;

use framescale_types::PixelFormat;

mod descriptor;
mod engine;
mod software;

pub use descriptor::{BindRejection, FrameDescriptor};
pub use engine::{ContextSpec, ScaleAlgorithm, ScaleEngine};
pub use software::{SoftwareContext, SoftwareEngine};

static INIT: Once = Once::new();

/**
    Process-wide one-time engine initialization.

    Runs its effect on the first call only; later calls return immediately.
    There is no teardown counterpart; engine state persists for the
    process lifetime.
*/
pub fn init() {
    INIT.call_once(|| {
        tracing::debug!(
            formats = PixelFormat::ALL.len(),
            "framescale engine initialized"
        );
    });
}
