/// Run the read/write conformance tests against a file system implementation
///
/// The first argument builds a fresh file system, the second names the
/// directory all test paths are placed under (e.g. `"c:"`).
#[macro_export]
macro_rules! test_vfs {
    ($fs:expr, $base:expr) => {
        #[cfg(test)]
        mod vfs_tests {
            use super::*;
            use $crate::error::VfsErrorKind;
            use $crate::{FileSystem, VfsResult};

            const DUMMY_FILE: &[u8] = &[1, 2, 3];

            fn create_fs() -> impl FileSystem {
                $fs
            }

            fn at(relative: &str) -> String {
                $crate::path::join($base, relative)
            }

            fn sorted(mut paths: Vec<String>) -> Vec<String> {
                paths.sort();
                paths
            }

            #[test]
            fn vfs_can_be_created() {
                create_fs();
            }

            #[test]
            fn creates_a_directory() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                assert!(fs.directory_exists(&at("folder")));
                assert!(!fs.directory_exists(&at("other")));
                Ok(())
            }

            #[test]
            fn creating_an_existing_directory_is_a_no_op() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.create_directory(&at("folder"))?;
                assert!(fs.directory_exists(&at("folder")));
                assert_eq!(fs.subdirectories_of(&at(""))?.len(), 1);
                Ok(())
            }

            #[test]
            fn creates_missing_ancestors() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at(r"top\folder\sub"))?;
                assert!(fs.directory_exists(&at("top")));
                assert!(fs.directory_exists(&at(r"top\folder")));
                assert!(fs.directory_exists(&at(r"top\folder\sub")));
                Ok(())
            }

            #[test]
            fn tolerates_trailing_separators() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder\\"))?;
                assert!(fs.directory_exists(&at("folder")));
                assert!(fs.directory_exists(&at("folder\\\\")));
                fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE)?;
                assert_eq!(
                    fs.files_of(&at("folder\\"))?,
                    vec![at(r"folder\file.ext")]
                );
                Ok(())
            }

            #[test]
            fn deletes_a_directory() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.delete_directory(&at("folder"))?;
                assert!(!fs.directory_exists(&at("folder")));
                Ok(())
            }

            #[test]
            fn deleting_a_directory_removes_its_subtree() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at(r"folder\sub\deeper"))?;
                fs.add_file(&at(r"folder\sub\file.ext"), DUMMY_FILE)?;
                fs.delete_directory(&at("folder"))?;
                assert!(!fs.directory_exists(&at("folder")));
                assert!(!fs.directory_exists(&at(r"folder\sub\deeper")));
                assert!(!fs.file_exists(&at(r"folder\sub\file.ext")));
                Ok(())
            }

            #[test]
            fn deleting_a_missing_directory_fails() {
                let fs = create_fs();
                let error = fs.delete_directory(&at("folder")).unwrap_err();
                assert!(error.is_directory_not_found(), "{}", error);
            }

            #[test]
            fn deletes_an_empty_directory_only() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at(r"empty"))?;
                fs.create_directory(&at(r"with_file"))?;
                fs.add_file(&at(r"with_file\file.ext"), DUMMY_FILE)?;
                fs.create_directory(&at(r"with_child\sub"))?;

                fs.delete_empty_directory(&at("empty"))?;
                assert!(!fs.directory_exists(&at("empty")));
                for occupied in ["with_file", "with_child"] {
                    let error = fs.delete_empty_directory(&at(occupied)).unwrap_err();
                    assert!(
                        matches!(error.kind(), VfsErrorKind::DirectoryNotEmpty),
                        "{}",
                        error
                    );
                }
                assert!(fs.file_exists(&at(r"with_file\file.ext")));
                assert!(fs.directory_exists(&at(r"with_child\sub")));

                let error = fs.delete_empty_directory(&at("missing")).unwrap_err();
                assert!(error.is_directory_not_found(), "{}", error);
                Ok(())
            }

            #[test]
            fn a_file_cannot_replace_a_directory() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at(r"folder\taken"))?;
                assert!(fs.add_file(&at(r"folder\taken"), DUMMY_FILE).is_err());
                assert!(fs.directory_exists(&at(r"folder\taken")));
                assert!(!fs.file_exists(&at(r"folder\taken")));
                Ok(())
            }

            #[test]
            fn a_directory_cannot_be_created_through_a_file() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE)?;
                assert!(fs.create_directory(&at(r"folder\file.ext")).is_err());
                assert!(fs.create_directory(&at(r"folder\file.ext\sub")).is_err());
                assert_eq!(fs.get_file(&at(r"folder\file.ext"))?, DUMMY_FILE);
                assert!(fs.subdirectories_of(&at("folder"))?.is_empty());
                Ok(())
            }

            #[test]
            fn returns_subdirectories() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at(r"folder\SubFolder"))?;
                fs.create_directory(&at("otherfolder"))?;
                assert_eq!(
                    sorted(fs.subdirectories_of(&at(""))?),
                    vec![at("folder"), at("otherfolder")]
                );
                assert_eq!(
                    sorted(fs.subdirectories_of_recursive(&at(""))?),
                    vec![at("folder"), at(r"folder\SubFolder"), at("otherfolder")]
                );
                Ok(())
            }

            #[test]
            fn enumerating_a_missing_directory_fails() {
                let fs = create_fs();
                assert!(fs.subdirectories_of(&at("folder")).unwrap_err().is_directory_not_found());
                assert!(fs
                    .subdirectories_of_recursive(&at("folder"))
                    .unwrap_err()
                    .is_directory_not_found());
                assert!(fs.files_of(&at("folder")).unwrap_err().is_directory_not_found());
                assert!(fs.files_of_recursive(&at("folder")).unwrap_err().is_directory_not_found());
            }

            #[test]
            fn adds_a_file() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE)?;
                assert!(fs.file_exists(&at(r"folder\file.ext")));
                assert_eq!(fs.get_file(&at(r"folder\file.ext"))?, DUMMY_FILE);
                Ok(())
            }

            #[test]
            fn adding_an_existing_file_replaces_its_content() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.add_file(&at(r"folder\file.ext"), &[9, 9])?;
                fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE)?;
                assert_eq!(fs.get_file(&at(r"folder\file.ext"))?, DUMMY_FILE);
                assert_eq!(fs.files_of(&at("folder"))?.len(), 1);
                Ok(())
            }

            #[test]
            fn adding_a_file_to_a_missing_directory_fails() {
                let fs = create_fs();
                let error = fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE).unwrap_err();
                assert!(error.is_directory_not_found(), "{}", error);
                assert!(!fs.file_exists(&at(r"folder\file.ext")));
            }

            #[test]
            fn empty_files_round_trip() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.add_file(&at(r"folder\empty"), &[])?;
                assert!(fs.file_exists(&at(r"folder\empty")));
                assert!(fs.get_file(&at(r"folder\empty"))?.is_empty());
                Ok(())
            }

            #[test]
            fn deletes_a_file_and_keeps_the_directory() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE)?;
                fs.delete_file(&at(r"folder\file.ext"))?;
                assert!(!fs.file_exists(&at(r"folder\file.ext")));
                assert!(fs.directory_exists(&at("folder")));
                Ok(())
            }

            #[test]
            fn deleting_a_missing_file_is_a_no_op() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.delete_file(&at(r"folder\file.ext"))?;
                assert!(!fs.file_exists(&at(r"folder\file.ext")));
                Ok(())
            }

            #[test]
            fn deleting_a_file_in_a_missing_directory_fails() {
                let fs = create_fs();
                let error = fs.delete_file(&at(r"folder\file.ext")).unwrap_err();
                assert!(error.is_directory_not_found(), "{}", error);
            }

            #[test]
            fn gets_a_file_or_reports_what_is_missing() -> VfsResult<()> {
                let fs = create_fs();
                let error = fs.get_file(&at(r"folder\file.ext")).unwrap_err();
                assert!(error.is_directory_not_found(), "{}", error);
                fs.create_directory(&at("folder"))?;
                let error = fs.get_file(&at(r"folder\file.ext")).unwrap_err();
                assert!(matches!(error.kind(), VfsErrorKind::FileNotFound), "{}", error);
                assert!(!fs.file_exists(&at(r"missing\file.ext")));
                Ok(())
            }

            #[test]
            fn moves_a_file() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.create_directory(&at("otherfolder"))?;
                fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE)?;
                fs.move_file(&at(r"folder\file.ext"), &at(r"otherfolder\otherfile.ext"))?;
                assert!(!fs.file_exists(&at(r"folder\file.ext")));
                assert_eq!(fs.get_file(&at(r"otherfolder\otherfile.ext"))?, DUMMY_FILE);
                Ok(())
            }

            #[test]
            fn moving_creates_the_destination_directory() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE)?;
                fs.move_file(&at(r"folder\file.ext"), &at(r"otherfolder\deep\otherfile.ext"))?;
                assert!(fs.directory_exists(&at(r"otherfolder\deep")));
                assert!(fs.file_exists(&at(r"otherfolder\deep\otherfile.ext")));
                assert!(!fs.file_exists(&at(r"folder\file.ext")));
                Ok(())
            }

            #[test]
            fn moving_overwrites_the_destination() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.create_directory(&at("otherfolder"))?;
                fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE)?;
                fs.add_file(&at(r"otherfolder\otherfile.ext"), &[9, 9])?;
                fs.move_file(&at(r"folder\file.ext"), &at(r"otherfolder\otherfile.ext"))?;
                assert_eq!(fs.get_file(&at(r"otherfolder\otherfile.ext"))?, DUMMY_FILE);
                assert!(!fs.file_exists(&at(r"folder\file.ext")));
                Ok(())
            }

            #[test]
            fn moving_a_missing_file_fails() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("otherfolder"))?;
                let error = fs
                    .move_file(&at(r"folder\file.ext"), &at(r"otherfolder\otherfile.ext"))
                    .unwrap_err();
                assert!(error.is_directory_not_found(), "{}", error);

                fs.create_directory(&at("folder"))?;
                let error = fs
                    .move_file(&at(r"folder\file.ext"), &at(r"otherfolder\otherfile.ext"))
                    .unwrap_err();
                assert!(matches!(error.kind(), VfsErrorKind::FileNotFound), "{}", error);
                assert!(!fs.file_exists(&at(r"otherfolder\otherfile.ext")));
                Ok(())
            }

            #[test]
            fn lists_files() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at(r"folder\sub"))?;
                fs.add_file(&at(r"folder\2.txt"), DUMMY_FILE)?;
                fs.add_file(&at(r"folder\1.pdf"), DUMMY_FILE)?;
                fs.add_file(&at(r"folder\sub\y.txt"), DUMMY_FILE)?;
                assert_eq!(
                    sorted(fs.files_of(&at("folder"))?),
                    vec![at(r"folder\1.pdf"), at(r"folder\2.txt")]
                );
                assert_eq!(
                    sorted(fs.files_of_recursive(&at("folder"))?),
                    vec![at(r"folder\1.pdf"), at(r"folder\2.txt"), at(r"folder\sub\y.txt")]
                );
                Ok(())
            }

            #[test]
            fn file_metadata() -> VfsResult<()> {
                let fs = create_fs();
                fs.create_directory(&at("folder"))?;
                fs.add_file(&at(r"folder\file.ext"), DUMMY_FILE)?;
                let metadata = fs.metadata(&at(r"folder\file.ext"))?;
                assert_eq!(metadata.file_type, $crate::VfsFileType::File);
                assert_eq!(metadata.len, 3);
                assert!(metadata.modified.is_some());
                let metadata = fs.metadata(&at("folder"))?;
                assert_eq!(metadata.file_type, $crate::VfsFileType::Directory);
                assert_eq!(metadata.len, 0);
                Ok(())
            }
        }
    };
}
