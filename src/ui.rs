/// Terminal status output
///
/// Reports go to stdout (or --output); everything meant for the person
/// running the command goes to stderr so it never ends up in a comment.
use lazy_static::lazy_static;
use std::io::Write;
use std::sync::Mutex;

/// Serialize writes to stderr
fn status_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print colored text to stderr, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        eprint!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        if let Some(ref mut t) = term::stderr() {
            if t.fg(fg).is_err() {
                return false;
            }
            let _ = t.attr(term::Attr::Bold);
            if write!(t, "{}", s).is_err() {
                return false;
            }
            let _ = t.reset();
            return true;
        }

        false
    }
}

/// Print a status message with "migration-reporter: " prefix
pub fn status(s: &str) {
    status_lock(|| {
        eprintln!("migration-reporter: {}", s);
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    status_lock(|| {
        print_color("error", term::color::BRIGHT_RED);
        eprintln!(": {}", msg);
    });
}
