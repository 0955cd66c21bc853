//! The compiled tzdb provider shared by the convenience methods.

use ticktime_provider::tzif::CompiledTzdbProvider;

std::thread_local! {
    static TZ_PROVIDER: CompiledTzdbProvider = CompiledTzdbProvider::default();
}

/// Runs `f` with this thread's compiled tzdb provider.
pub(crate) fn with_provider<T>(f: impl FnOnce(&CompiledTzdbProvider) -> T) -> T {
    TZ_PROVIDER.with(f)
}
