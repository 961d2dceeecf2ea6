//! 产物存储路径与写入模块
//!
//! # 设计思路
//!
//! 统一管理各变换产物的落盘位置与写入方式：
//!
//! - 所有写入都先写同目录下的临时文件，再重命名到目标路径，
//!   调用方不会看到半写的文件。
//! - 输出目录优先级：显式路径 > 设置中的 `output_dir` > 输入文件所在目录。
//! - 拼图碎片先写入 `<目录>/.<id>.partial/`，全部完成后改名为 `<目录>/<id>/`，
//!   文件为 `1.png … N.png`，按文件名数字升序发现。
//!
//! # 实现思路
//!
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。
//! - 目录不存在时自动 `create_dir_all`，避免上层判断。

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 原子写入：临时文件 + 重命名。失败时清理临时文件。
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = parent_or_current(path);
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("目标路径缺少文件名: {}", path.display()),
        )
    })?;

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    let tmp_path = dir.join(format!(
        ".{}.{:016x}.tmp",
        file_name.to_string_lossy(),
        rand::random::<u64>()
    ));

    if let Err(err) = write_and_sync(&tmp_path, bytes) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    Ok(())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// 路径的父目录；纯文件名时返回当前目录。
pub fn parent_or_current(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// 解析产物输出目录
///
/// # 参数
/// * `output_dir` - 设置中的输出目录（可选）
/// * `input` - 输入文件或目录
pub fn resolve_output_dir(output_dir: Option<&Path>, input: &Path) -> PathBuf {
    match output_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => parent_or_current(input),
    }
}

/// 字节彩虹图的默认输出路径：替换扩展名为 `.png`，无扩展名时追加。
pub fn default_rainbow_output(input: &Path) -> PathBuf {
    input.with_extension("png")
}

/// 第 `index` 块碎片的文件名（从 1 开始编号）。
pub fn piece_file_name(index: usize) -> String {
    format!("{}.png", index + 1)
}

/// 创建碎片暂存目录 `<base>/.<id>.partial`。
///
/// 碎片全部写完后由 `publish_dir` 改名为 `<base>/<id>`，
/// 中途失败则由 `discard_dir` 整体删除。
pub fn create_staging_dir(base: &Path, id: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(base)?;
    let dir = base.join(format!(".{id}.partial"));
    fs::create_dir(&dir)?;
    Ok(dir)
}

/// 将暂存目录改名为 `<base>/<id>`；改名失败时删除暂存目录。
pub fn publish_dir(staging: &Path, base: &Path, id: &str) -> io::Result<PathBuf> {
    let dir = base.join(id);
    if let Err(err) = fs::rename(staging, &dir) {
        discard_dir(staging);
        return Err(err);
    }
    Ok(dir)
}

/// 尽力删除半成品目录，失败只记录警告。
pub fn discard_dir(dir: &Path) {
    if let Err(err) = fs::remove_dir_all(dir) {
        log::warn!("清理未完成的目录失败 ({}): {}", dir.display(), err);
    }
}

/// 发现目录下的碎片文件，按文件名数字升序返回。
///
/// 只接受 `<正整数>.png`，其余文件跳过。
pub fn discover_pieces(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut numbered: Vec<(u64, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        match piece_number(&path) {
            Some(number) if path.is_file() => numbered.push((number, path)),
            _ => log::debug!("跳过非碎片文件: {}", path.display()),
        }
    }

    numbered.sort_by_key(|(number, _)| *number);
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

fn piece_number(path: &Path) -> Option<u64> {
    let is_png = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return None;
    }

    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    stem.parse::<u64>().ok().filter(|&n| n > 0)
}
