use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

/// System allocator wrapper tracking live and peak heap bytes.
pub struct PeakAlloc {
    live: AtomicUsize,
    peak: AtomicUsize,
    allocations: AtomicUsize,
}

/// Heap usage of one measured closure.
#[derive(Clone, Copy, Debug)]
pub struct HeapUsage {
    /// Peak bytes above the live baseline at the start.
    pub peak_bytes: usize,
    pub allocations: usize,
}

impl PeakAlloc {
    pub const fn new() -> Self {
        Self {
            live: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            allocations: AtomicUsize::new(0),
        }
    }

    /// Run `f` and report the heap it needed on top of what was already live.
    pub fn measure<R>(&self, f: impl FnOnce() -> R) -> (R, HeapUsage) {
        let baseline = self.live.load(Ordering::SeqCst);
        self.peak.store(baseline, Ordering::SeqCst);
        let allocations_before = self.allocations.load(Ordering::SeqCst);
        let out = f();
        let usage = HeapUsage {
            peak_bytes: self.peak.load(Ordering::SeqCst).saturating_sub(baseline),
            allocations: self.allocations.load(Ordering::SeqCst) - allocations_before,
        };
        (out, usage)
    }

    fn grow(&self, bytes: usize) {
        let live = self.live.fetch_add(bytes, Ordering::SeqCst) + bytes;
        self.peak.fetch_max(live, Ordering::SeqCst);
        self.allocations.fetch_add(1, Ordering::SeqCst);
    }

    fn shrink(&self, bytes: usize) {
        let _ = self
            .live
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |live| {
                Some(live.saturating_sub(bytes))
            });
    }
}

unsafe impl GlobalAlloc for PeakAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            self.grow(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            self.grow(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        self.shrink(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            self.shrink(layout.size());
            self.grow(new_size);
        }
        new_ptr
    }
}
