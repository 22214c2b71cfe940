#![cfg(test)]

use std::io;

use super::*;

#[test]
fn test_classification() {
    assert_eq!(FsError::from_raw_os_error(libc::ENOENT), FsError::from(NotFoundError));
    assert_eq!(FsError::from_raw_os_error(libc::ENOTDIR), FsError::from(NotDirError));
    assert_eq!(FsError::from_raw_os_error(libc::EACCES), FsError::from(PermissionError));
    assert_eq!(FsError::from_raw_os_error(libc::EPERM), FsError::from(PermissionError));
    assert_eq!(FsError::from_raw_os_error(libc::ELOOP), FsError::from(OtherError(libc::ELOOP)));
}

#[test]
fn test_normalized_folds_not_dir() {
    assert!(FsError::normalized(libc::ENOTDIR).is_not_found());
    assert!(FsError::normalized(libc::ENOENT).is_not_found());
    assert!(FsError::normalized(libc::EACCES).is_permission());
}

#[test]
fn test_raw_os_error_and_io() {
    assert_eq!(FsError::from(NotDirError).raw_os_error(), libc::ENOTDIR);
    assert_eq!(FsError::from(OtherError(libc::EISDIR)).raw_os_error(), libc::EISDIR);

    let error = io::Error::from(FsError::from(NotFoundError));
    assert_eq!(error.kind(), io::ErrorKind::NotFound);
    let error = io::Error::from(FsError::from(PermissionError));
    assert_eq!(error.kind(), io::ErrorKind::PermissionDenied);
}

#[test]
fn test_display() {
    assert_eq!(FsError::from(NotFoundError).to_string(), "no such file or directory");
    assert_eq!(
        FsError::from(OtherError(libc::EIO)).to_string(),
        format!("unexpected OS error with code: {}", libc::EIO)
    );
}
