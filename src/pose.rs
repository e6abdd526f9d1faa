use serde::{Deserialize, Serialize};

/// 姿势库中的一个姿势标记，由宿主持有
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseMarker {
    /// 姿势名称，绑定缩略图后会带上后缀
    pub name: String,
    /// 姿势所在的帧
    pub frame: i64,
}

impl PoseMarker {
    pub fn new(name: impl Into<String>, frame: i64) -> Self {
        Self { name: name.into(), frame }
    }
}

/// 姿势的缩略图记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailRecord {
    /// 不带后缀的姿势名称
    pub name: String,
    /// 绑定时姿势的位置，姿势重新排序后可能过期
    pub index: usize,
    /// 姿势的帧，作为记录的查找键
    pub frame: i64,
    /// 缩略图路径
    pub filepath: String,
}

/// 按插入顺序保存的缩略图记录，每个帧最多一条
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThumbnailCollection(Vec<ThumbnailRecord>);

impl ThumbnailCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThumbnailRecord> {
        self.0.iter()
    }

    /// 返回第一个帧号相同的记录
    pub fn find_by_frame(&self, frame: i64) -> Option<&ThumbnailRecord> {
        self.0.iter().find(|record| record.frame == frame)
    }

    pub fn find_by_frame_mut(&mut self, frame: i64) -> Option<&mut ThumbnailRecord> {
        self.0.iter_mut().find(|record| record.frame == frame)
    }

    /// 查找帧对应的记录，不存在则追加一条空记录
    ///
    /// 返回的布尔值表示记录是否为新建
    pub fn find_or_insert(&mut self, frame: i64) -> (&mut ThumbnailRecord, bool) {
        match self.0.iter().position(|record| record.frame == frame) {
            Some(pos) => (&mut self.0[pos], false),
            None => {
                self.0.push(ThumbnailRecord {
                    name: String::new(),
                    index: 0,
                    frame,
                    filepath: String::new(),
                });
                let last = self.0.len() - 1;
                (&mut self.0[last], true)
            }
        }
    }
}

/// 返回帧号对应的姿势当前所在的位置
///
/// 每次调用都会重新扫描，姿势被宿主重新排序后结果依然正确
pub fn find_index_by_frame(markers: &[PoseMarker], frame: i64) -> Option<usize> {
    markers.iter().position(|marker| marker.frame == frame)
}

/// 姿势库：有序的姿势标记以及对应的缩略图记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseLibrary {
    pub markers: Vec<PoseMarker>,
    #[serde(default)]
    pub thumbnails: ThumbnailCollection,
    /// 当前激活的姿势位置
    #[serde(default)]
    pub active: Option<usize>,
}

impl PoseLibrary {
    pub fn new(markers: Vec<PoseMarker>) -> Self {
        Self { markers, thumbnails: ThumbnailCollection::new(), active: None }
    }

    pub fn active_pose(&self) -> Option<(usize, &PoseMarker)> {
        let index = self.active?;
        self.markers.get(index).map(|marker| (index, marker))
    }

    /// 返回姿势的缩略图记录
    pub fn record_for_pose(&self, index: usize) -> Option<&ThumbnailRecord> {
        let marker = self.markers.get(index)?;
        self.thumbnails.find_by_frame(marker.frame)
    }

    /// 返回记录所属的姿势
    pub fn pose_for_record(&self, record: &ThumbnailRecord) -> Option<&PoseMarker> {
        self.markers.iter().find(|marker| marker.frame == record.frame)
    }

    /// 按当前姿势顺序返回缩略图记录，没有缩略图的姿势会被跳过
    pub fn records_in_pose_order(&self) -> impl Iterator<Item = &ThumbnailRecord> {
        self.markers.iter().filter_map(|marker| self.thumbnails.find_by_frame(marker.frame))
    }
}

/// 姿势名称后缀，用于标记已经有缩略图的姿势
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoseSuffix(String);

impl PoseSuffix {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 去掉名称末尾的后缀
    ///
    /// 重复的后缀会被全部去掉，保证结果再次清理后不变
    pub fn clean<'a>(&self, name: &'a str) -> &'a str {
        if self.0.is_empty() {
            return name;
        }
        let mut name = name;
        while let Some(stripped) = name.strip_suffix(self.0.as_str()) {
            name = stripped;
        }
        name
    }

    /// 给名称加上后缀，已经带后缀的名称保持不变
    pub fn apply(&self, name: &str) -> String {
        if name.ends_with(self.0.as_str()) {
            name.to_owned()
        } else {
            format!("{}{}", name, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rstest::*;

    use super::*;
    use crate::bind::Binder;

    #[fixture]
    fn suffix() -> PoseSuffix {
        PoseSuffix::new(" (thumbnail)")
    }

    #[fixture]
    fn library() -> PoseLibrary {
        PoseLibrary::new(vec![
            PoseMarker::new("Idle", 1),
            PoseMarker::new("Wave", 5),
            PoseMarker::new("Jump", 9),
        ])
    }

    #[rstest]
    #[case("Wave")]
    #[case("Wave (thumbnail)")]
    #[case("Wave (thumbnail) (thumbnail)")]
    #[case("")]
    fn suffix_is_idempotent(suffix: PoseSuffix, #[case] name: &str) {
        let once = suffix.apply(name);
        assert_eq!(suffix.apply(&once), once);
        let cleaned = suffix.clean(name);
        assert_eq!(suffix.clean(cleaned), cleaned);
    }

    #[rstest]
    #[case("Wave")]
    #[case("Jump (left)")]
    #[case("thumbnail")]
    fn clean_undoes_apply(suffix: PoseSuffix, #[case] name: &str) {
        assert_eq!(suffix.clean(&suffix.apply(name)), name);
    }

    #[test]
    fn empty_suffix_is_identity() {
        let suffix = PoseSuffix::new("");
        assert_eq!(suffix.clean("Wave"), "Wave");
        assert_eq!(suffix.apply("Wave"), "Wave");
    }

    #[rstest]
    fn find_or_insert_keeps_one_record_per_frame(mut library: PoseLibrary) {
        let (record, created) = library.thumbnails.find_or_insert(5);
        assert!(created);
        record.filepath = "wave.png".to_owned();

        let (record, created) = library.thumbnails.find_or_insert(5);
        assert!(!created);
        assert_eq!(record.filepath, "wave.png");
        assert_eq!(library.thumbnails.len(), 1);
    }

    #[rstest]
    fn frame_lookup_survives_reorder(mut library: PoseLibrary, suffix: PoseSuffix) {
        Binder::new(suffix).bind(&mut library, 2, Path::new("jump.png")).unwrap();

        library.markers.reverse();

        assert_eq!(find_index_by_frame(&library.markers, 9), Some(0));
        let record = library.record_for_pose(0).unwrap();
        assert_eq!(record.frame, 9);
        assert_eq!(record.index, 2);
        assert_eq!(record.filepath, "jump.png");
        assert_eq!(library.thumbnails.find_by_frame(9), Some(record));
        assert_eq!(library.pose_for_record(record).unwrap().name, "Jump (thumbnail)");
    }

    #[rstest]
    fn records_follow_pose_order(mut library: PoseLibrary) {
        library.thumbnails.find_or_insert(9);
        library.thumbnails.find_or_insert(1);

        let frames: Vec<_> = library.records_in_pose_order().map(|r| r.frame).collect();
        assert_eq!(frames, vec![1, 9]);
    }

    #[rstest]
    fn missing_frame_returns_none(library: PoseLibrary) {
        assert_eq!(find_index_by_frame(&library.markers, 42), None);
        assert!(library.thumbnails.find_by_frame(1).is_none());
    }
}
