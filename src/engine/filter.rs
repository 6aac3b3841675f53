use crate::models::Entry;

fn matches(entry: &Entry, needle: &str) -> bool {
    entry.id.to_lowercase().contains(needle) || entry.name.to_lowercase().contains(needle)
}

fn matching<'a>(entries: &'a [Entry], query: &str) -> impl Iterator<Item = &'a Entry> {
    let needle = query.trim().to_lowercase();
    entries
        .iter()
        .filter(move |e| needle.is_empty() || matches(e, &needle))
}

/// 按 ID 或姓名做不区分大小写的子串过滤；查询为空（trim 后）时原样返回。
pub fn filter_entries(entries: &[Entry], query: &str) -> Vec<Entry> {
    matching(entries, query).cloned().collect()
}

/// 与 `filter_entries` 同样的匹配规则，只计数不复制
pub fn count_matches(entries: &[Entry], query: &str) -> usize {
    matching(entries, query).count()
}
