use std::path::{Path, PathBuf};
use std::{env, fs, io};

/// Reads a corpus file: one example name per line.
///
/// Surrounding whitespace (`\r` included) is trimmed and blank lines are
/// skipped. Checking the words against an alphabet is left to the models.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	let contents = fs::read_to_string(filename)?;
	Ok(contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect())
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/brands.dat"` → `"brands"`
/// - `"brands.dat"` → `"brands"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> io::Result<String> {
	let stem = input_path
		.as_ref()
		.file_stem()
		.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Path has no filename"))?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted so that loading order does
/// not depend on the file system.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> io::Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Scratch directory removed on drop.
	struct ScratchDir(PathBuf);

	impl ScratchDir {
		fn new(name: &str) -> Self {
			let path = env::temp_dir().join(format!("brandon-io-{name}-{}", std::process::id()));
			let _ = fs::remove_dir_all(&path);
			fs::create_dir_all(&path).unwrap();
			Self(path)
		}
	}

	impl Drop for ScratchDir {
		fn drop(&mut self) {
			let _ = fs::remove_dir_all(&self.0);
		}
	}

	#[test]
	fn corpus_lines_are_trimmed_and_blank_lines_skipped() {
		let dir = ScratchDir::new("corpus");
		let file = dir.0.join("names.dat");
		fs::write(&file, "anna\r\n  emma \n\n\t\nlola\n").unwrap();

		assert_eq!(read_corpus(&file).unwrap(), vec!["anna", "emma", "lola"]);
	}

	#[test]
	fn lists_files_by_extension() {
		let dir = ScratchDir::new("list");
		fs::write(dir.0.join("b.dat"), "x").unwrap();
		fs::write(dir.0.join("a.dat"), "x").unwrap();
		fs::write(dir.0.join("c.txt"), "x").unwrap();
		fs::create_dir(dir.0.join("d.dat")).unwrap();

		assert_eq!(list_files(&dir.0, "dat").unwrap(), vec!["a.dat", "b.dat"]);
	}

	#[test]
	fn filename_stem() {
		assert_eq!(get_filename("./data/brands.dat").unwrap(), "brands");
		assert_eq!(get_filename("brands").unwrap(), "brands");
	}

	#[test]
	fn dot_folder_is_the_working_directory() {
		assert_eq!(normalize_folder("data"), PathBuf::from("data"));
		assert!(normalize_folder(".").is_absolute());
	}
}
