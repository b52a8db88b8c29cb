//! mlock status and core dump disabling (Unix only).

use vettid_crypto_core::memory::{disable_core_dumps, SecretBuffer};

#[cfg(unix)]
#[test]
fn secret_buffer_reports_mlock_status() {
    let buf = SecretBuffer::new(b"mlock test data").expect("allocation should succeed");
    // Containers often have a zero mlock quota; only check that the query works.
    eprintln!("mlock status: {}", buf.is_mlocked());
}

#[cfg(unix)]
#[test]
fn disable_core_dumps_sets_rlimit_zero() {
    disable_core_dumps().expect("disable_core_dumps should succeed");

    let mut limit = libc::rlimit {
        rlim_cur: 1,
        rlim_max: 1,
    };
    let ret = unsafe { libc::getrlimit(libc::RLIMIT_CORE, &raw mut limit) };
    assert_eq!(ret, 0, "getrlimit failed");
    assert_eq!(limit.rlim_cur, 0);
    assert_eq!(limit.rlim_max, 0);
}
