//! 中文數字序號（一、二、……十、十一、……一百零一）

const DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];
const PLACES: [&str; 4] = ["", "十", "百", "千"];
const SECTIONS: [&str; 5] = ["", "万", "亿", "万亿", "亿亿"];

pub fn to_chinese(n: u64) -> String {
    if n == 0 {
        return DIGITS[0].to_string();
    }

    // 以萬為單位切段，低位在前
    let mut sections = Vec::new();
    let mut rest = n;
    while rest > 0 {
        sections.push((rest % 10_000) as u16);
        rest /= 10_000;
    }

    let mut out = String::new();
    let mut zero_pending = false;
    for (idx, &section) in sections.iter().enumerate().rev() {
        if section == 0 {
            zero_pending = !out.is_empty();
            continue;
        }
        if !out.is_empty() && (zero_pending || section < 1000) {
            out.push_str(DIGITS[0]);
        }
        out.push_str(&section_to_chinese(section));
        out.push_str(SECTIONS[idx]);
        zero_pending = false;
    }

    // 開頭的「一十」讀作「十」
    match out.strip_prefix("一十") {
        Some(tail) => format!("十{}", tail),
        None => out,
    }
}

fn section_to_chinese(section: u16) -> String {
    let mut out = String::new();
    let mut zero_pending = false;

    for place in (0..4).rev() {
        let digit = (section / 10u16.pow(place as u32) % 10) as usize;
        if digit == 0 {
            zero_pending = !out.is_empty();
            continue;
        }
        if zero_pending {
            out.push_str(DIGITS[0]);
            zero_pending = false;
        }
        out.push_str(DIGITS[digit]);
        out.push_str(PLACES[place]);
    }

    out
}
