/// Stress level keyed by the classifier's class index.
///
/// Indices without an entry map to [`ClassLabel::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassLabel {
    Low,
    Medium,
    High,
    Unknown(i64),
}

impl ClassLabel {
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => ClassLabel::Low,
            1 => ClassLabel::Medium,
            2 => ClassLabel::High,
            other => ClassLabel::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClassLabel::Low => "Thấp (Low)",
            ClassLabel::Medium => "Trung bình (Medium)",
            ClassLabel::High => "Cao (High)",
            ClassLabel::Unknown(_) => "Không xác định",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            ClassLabel::Low => "Tình trạng tinh thần của bạn rất tốt. Mức độ stress thấp cho thấy bạn đang kiểm soát tốt các yếu tố áp lực trong cuộc sống. Hãy tiếp tục duy trì thói quen sinh hoạt và suy nghĩ tích cực!",
            ClassLabel::Medium => "Bạn đang có dấu hiệu stress ở mức độ vừa phải. Đây có thể là phản ứng bình thường trước các áp lực, nhưng bạn nên chú ý. Hãy dành thời gian thư giãn, xem xét lại khối lượng công việc/học tập và chia sẻ với bạn bè.",
            ClassLabel::High => "Mức độ stress của bạn đang ở mức cao. Đây là một cảnh báo quan trọng. Stress cao kéo dài có thể ảnh hưởng nghiêm trọng đến sức khỏe thể chất và tinh thần. Bạn nên giảm tải công việc ngay lập tức, tìm kiếm sự giúp đỡ từ chuyên gia hoặc người thân.",
            ClassLabel::Unknown(_) => "Không có lời giải thích cho kết quả này.",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ClassLabel::Unknown(_))
    }
}
