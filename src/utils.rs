/// Normalize a path captured from `stat` output: backslashes become `/`,
/// empty and `.` components are dropped (`..` is kept), and a trailing
/// separator goes away. `./x` becomes `x`; a path of only `.` stays `.`.
pub fn normalize_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    let absolute = path.starts_with('/');
    let parts: Vec<&str> = path
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();
    match (absolute, parts.is_empty()) {
        (true, _) => format!("/{}", parts.join("/")),
        (false, true) => ".".to_string(),
        (false, false) => parts.join("/"),
    }
}

/// Split a normalized path into (directory, file name).
/// A bare file name lives in `/`.
pub fn split_dir_name(path: &str) -> (String, String) {
    match path.rsplit_once('/') {
        Some(("", name)) => ("/".to_string(), name.to_string()),
        Some((dir, name)) => (dir.to_string(), name.to_string()),
        None if path == "." => ("/".to_string(), String::new()),
        None => ("/".to_string(), path.to_string()),
    }
}

/// Split `"2024-01-01 10:00:00.000000000 +0900"` into the timestamp and its
/// offset. With fewer than three tokens the whole trimmed text is the
/// timestamp and there is no offset.
pub fn split_time_and_offset(text: &str) -> (String, Option<&str>) {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() >= 3 {
        (format!("{} {}", parts[0], parts[1]), Some(parts[2]))
    } else {
        (text.trim().to_string(), None)
    }
}
