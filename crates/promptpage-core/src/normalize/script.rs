//! Traditional to simplified Han folding
//!
//! Only characters that commonly appear in listed company names are covered.
//! Unmapped characters pass through untouched.

/// Map a single traditional character to its simplified form
fn simplify(c: char) -> char {
    match c {
        '騰' => '腾',
        '訊' => '讯',
        '長' => '长',
        '東' => '东',
        '龍' => '龙',
        '國' => '国',
        '華' => '华',
        '銀' => '银',
        '證' => '证',
        '貿' => '贸',
        '業' => '业',
        '車' => '车',
        '醫' => '医',
        '藥' => '药',
        '電' => '电',
        '網' => '网',
        '雲' => '云',
        '資' => '资',
        '產' => '产',
        '實' => '实',
        '開' => '开',
        '發' => '发',
        '團' => '团',
        '滙' => '汇',
        '豐' => '丰',
        '廣' => '广',
        '滬' => '沪',
        '臺' => '台',
        '亞' => '亚',
        '馬' => '马',
        '風' => '风',
        '優' => '优',
        '愛' => '爱',
        '蘋' => '苹',
        '貝' => '贝',
        '達' => '达',
        '進' => '进',
        '樂' => '乐',
        '麗' => '丽',
        '億' => '亿',
        '萬' => '万',
        '財' => '财',
        other => other,
    }
}

/// Fold traditional Han characters to simplified, character by character
pub fn fold_script(text: &str) -> String {
    text.chars().map(simplify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_script_maps_known_characters() {
        assert_eq!(fold_script("騰訊"), "腾讯");
        assert_eq!(fold_script("中國銀行"), "中国银行");
    }

    #[test]
    fn test_fold_script_passes_through_unmapped() {
        assert_eq!(fold_script("贵州茅台 AAPL 123"), "贵州茅台 AAPL 123");
        assert_eq!(fold_script(""), "");
    }

    #[test]
    fn test_fold_script_is_idempotent() {
        let once = fold_script("滙豐控股");
        assert_eq!(fold_script(&once), once);
    }
}
