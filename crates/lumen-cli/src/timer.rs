pub struct TimedResult<T> {
    pub res: T,
    pub elapsed: std::time::Duration,
}

pub fn timed_scope<R, F: FnOnce() -> R>(f: F) -> TimedResult<R> {
    let begin = std::time::Instant::now();
    let res = f();
    TimedResult {
        res,
        elapsed: begin.elapsed(),
    }
}

pub fn timed_scope_log<R, F: FnOnce() -> R>(label: &'static str, f: F) -> TimedResult<R> {
    let timed = timed_scope(f);
    log::info!("{}: {}", label, format_elapsed(timed.elapsed));
    timed
}

pub fn format_elapsed(elapsed: std::time::Duration) -> String {
    if elapsed < std::time::Duration::from_secs(1) {
        let milli = elapsed.as_secs_f32() * 1000.;
        format!("{milli:.3}ms")
    } else if elapsed < std::time::Duration::from_secs(60) {
        let s = elapsed.as_secs_f32();
        format!("{s:.3}s")
    } else {
        let secs = elapsed.as_secs();
        format!("{}m{}s", secs / 60, secs % 60)
    }
}
