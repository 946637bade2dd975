//! 제한된 마크업 부분집합을 구조화된 문서 모델로 변환한다.
//!
//! 결과는 HTML 같은 마크업 문자열이 아니라 토큰 트리이므로, 원문에
//! 무엇이 들어 있든(`<`, `>` 포함) 텍스트 페이로드로만 전달되고 절대
//! 해석·실행되지 않는다. 입력은 한 글자씩 자라는 미완성 마크업일 수
//! 있으며, 닫히지 않은 구문은 항상 글자 그대로 렌더링된다.

/// 한 줄 안에서 나타나는 인라인 서식 조각이다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// 서식 없는 일반 텍스트.
    Text(String),
    /// `**텍스트**` 굵은 강조.
    Bold(String),
    /// `*텍스트*` 기울임 강조.
    Italic(String),
    /// `` `텍스트` `` 고정폭 코드 조각.
    Code(String),
    /// `[텍스트](주소)` 링크. UI는 실제로 이동하지 않는다.
    Link {
        /// 표시할 텍스트.
        text: String,
        /// 링크 대상. 표시 용도로만 보관한다.
        url: String,
    },
    /// `![설명](주소)` 이미지. 네트워크 요청 없이 자리 표시자로 그린다.
    Image {
        /// 대체 설명 텍스트.
        alt: String,
        /// 이미지 주소. 표시 용도로만 보관한다.
        url: String,
    },
}

/// 줄 단위로 구분되는 블록 요소이다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// 일반 문단. 빈 줄은 빈 문단으로 줄바꿈을 표현한다.
    Paragraph(Vec<Inline>),
    /// `> `로 시작하는 인용 줄.
    Quote(Vec<Inline>),
    /// `* `로 시작하는 연속된 목록 항목들. 한 블록으로 묶인다.
    List(Vec<Vec<Inline>>),
}

/// 마크업 텍스트를 블록 목록으로 파싱한다.
///
/// 같은 입력은 항상 같은 결과를 내며, 어떤 입력에도 패닉하지 않는다.
pub fn parse_markup(input: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    let mut list_items: Vec<Vec<Inline>> = Vec::new();
    for line in input.split('\n') {
        if let Some(item) = line.strip_prefix("* ") {
            list_items.push(parse_inlines(item));
            continue;
        }
        flush_list(&mut list_items, &mut blocks);
        if let Some(quoted) = line.strip_prefix("> ") {
            blocks.push(Block::Quote(parse_inlines(quoted)));
        } else {
            blocks.push(Block::Paragraph(parse_inlines(line)));
        }
    }
    flush_list(&mut list_items, &mut blocks);
    blocks
}

/// 모아 둔 목록 항목들을 하나의 List 블록으로 내보낸다.
fn flush_list(list_items: &mut Vec<Vec<Inline>>, blocks: &mut Vec<Block>) {
    if !list_items.is_empty() {
        blocks.push(Block::List(std::mem::take(list_items)));
    }
}

/// 한 줄을 좌에서 우로 한 번 훑으며 인라인 조각으로 나눈다.
///
/// 우선순위는 이미지 > 링크 > 코드 > 굵게 > 기울임 순서로 고정이며,
/// 기울임은 내용에 별표가 없는 경우에만 성립한다.
fn parse_inlines(line: &str) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::new();
    let mut plain = String::new();
    let mut i = 0;
    while i < line.len() {
        let rest = &line[i..];

        if rest.starts_with("![") {
            if let Some((alt, url, consumed)) = scan_bracket_pair(&rest[1..]) {
                flush_text(&mut plain, &mut out);
                out.push(Inline::Image { alt, url });
                i += 1 + consumed;
                continue;
            }
        }
        if rest.starts_with('[') {
            if let Some((text, url, consumed)) = scan_bracket_pair(rest) {
                flush_text(&mut plain, &mut out);
                out.push(Inline::Link { text, url });
                i += consumed;
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix('`') {
            if let Some(end) = after.find('`') {
                flush_text(&mut plain, &mut out);
                out.push(Inline::Code(after[..end].to_string()));
                i += end + 2;
                continue;
            }
        }
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**") {
                flush_text(&mut plain, &mut out);
                out.push(Inline::Bold(after[..end].to_string()));
                i += end + 4;
                continue;
            }
        } else if let Some(after) = rest.strip_prefix('*') {
            // 닫는 별표까지의 내용에는 별표가 없어야 하고 비어 있으면 안 된다.
            if let Some(end) = after.find('*') {
                if end > 0 {
                    flush_text(&mut plain, &mut out);
                    out.push(Inline::Italic(after[..end].to_string()));
                    i += end + 2;
                    continue;
                }
            }
        }

        // 어떤 규칙에도 걸리지 않으면 글자 그대로 남긴다.
        let ch_len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        plain.push_str(&rest[..ch_len]);
        i += ch_len;
    }
    flush_text(&mut plain, &mut out);
    out
}

/// `[텍스트](주소)` 꼴을 해석한다. 성공 시 소비한 바이트 수를 함께 반환한다.
fn scan_bracket_pair(s: &str) -> Option<(String, String, usize)> {
    let after_open = s.strip_prefix('[')?;
    let close = after_open.find("](")?;
    let text = &after_open[..close];
    let after_mid = &after_open[close + 2..];
    let end = after_mid.find(')')?;
    let url = &after_mid[..end];
    Some((text.to_string(), url.to_string(), close + end + 4))
}

/// 누적된 일반 텍스트를 Text 조각으로 내보낸다.
fn flush_text(plain: &mut String, out: &mut Vec<Inline>) {
    if !plain.is_empty() {
        out.push(Inline::Text(std::mem::take(plain)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 단일 문단의 인라인 목록을 꺼내는 테스트 헬퍼이다.
    fn inlines_of(input: &str) -> Vec<Inline> {
        let blocks = parse_markup(input);
        assert_eq!(blocks.len(), 1, "단일 블록을 기대했습니다: {blocks:?}");
        match blocks.into_iter().next() {
            Some(Block::Paragraph(inlines)) => inlines,
            other => panic!("문단 블록을 기대했습니다: {other:?}"),
        }
    }

    /// 굵은 강조가 별표 없이 분리되는지 검증한다.
    #[test]
    fn bold_splits_without_stray_asterisks() {
        let inlines = inlines_of("a **b** c");
        assert_eq!(
            inlines,
            vec![
                Inline::Text("a ".into()),
                Inline::Bold("b".into()),
                Inline::Text(" c".into()),
            ]
        );
    }

    /// 이미지 규칙이 링크 규칙보다 먼저 적용되는지 검증한다.
    #[test]
    fn image_wins_over_link() {
        let inlines = inlines_of("![x](http://example.com/y.png)");
        assert_eq!(
            inlines,
            vec![Inline::Image {
                alt: "x".into(),
                url: "http://example.com/y.png".into(),
            }]
        );
    }

    /// 링크가 표시 텍스트와 주소로 분리되는지 검증한다.
    #[test]
    fn link_keeps_text_and_url() {
        let inlines = inlines_of("여기 [안내 문서](https://example.com/guide) 참고");
        assert_eq!(
            inlines,
            vec![
                Inline::Text("여기 ".into()),
                Inline::Link {
                    text: "안내 문서".into(),
                    url: "https://example.com/guide".into(),
                },
                Inline::Text(" 참고".into()),
            ]
        );
    }

    /// 코드 조각과 기울임이 함께 해석되는지 검증한다.
    #[test]
    fn code_and_italic() {
        let inlines = inlines_of("`cargo run` 명령과 *강조*");
        assert_eq!(
            inlines,
            vec![
                Inline::Code("cargo run".into()),
                Inline::Text(" 명령과 ".into()),
                Inline::Italic("강조".into()),
            ]
        );
    }

    /// 굵은 강조 내부에서 기울임이 다시 발화하지 않는지 검증한다.
    #[test]
    fn italic_does_not_refire_inside_bold() {
        let inlines = inlines_of("**굵게** 그리고 *기울임*");
        assert_eq!(
            inlines,
            vec![
                Inline::Bold("굵게".into()),
                Inline::Text(" 그리고 ".into()),
                Inline::Italic("기울임".into()),
            ]
        );
    }

    /// 닫히지 않은 굵은 강조가 글자 그대로 남는지 검증한다.
    #[test]
    fn unterminated_bold_stays_literal() {
        let inlines = inlines_of("**bold");
        assert_eq!(inlines, vec![Inline::Text("**bold".into())]);
    }

    /// 타이핑 중 글자가 하나씩 늘어나도 파서가 안전한지 검증한다.
    #[test]
    fn every_growing_prefix_parses_without_panic() {
        let full = "가족 모두에게 추천하고 싶은 책 **『마음의 빛』** 정말 따뜻한 이야기입니다.";
        let mut prefix = String::new();
        for ch in full.chars() {
            prefix.push(ch);
            let first = parse_markup(&prefix);
            let second = parse_markup(&prefix);
            assert_eq!(first, second, "같은 입력은 같은 결과여야 합니다");
        }
        // 마지막 프레임에서는 굵은 강조가 완성된다.
        let inlines = inlines_of(full);
        assert!(inlines.contains(&Inline::Bold("『마음의 빛』".into())));
    }

    /// 꺾쇠괄호가 텍스트 페이로드로만 전달되는지 검증한다.
    #[test]
    fn angle_brackets_remain_inert_text() {
        let inlines = inlines_of("<b>주의</b> 하세요");
        assert_eq!(inlines, vec![Inline::Text("<b>주의</b> 하세요".into())]);
    }

    /// 인용 줄과 목록 묶음, 빈 줄 처리를 검증한다.
    #[test]
    fn blocks_group_quotes_and_lists() {
        let blocks = parse_markup("> 인용문\n* 첫째\n* 둘째\n\n마무리");
        assert_eq!(
            blocks,
            vec![
                Block::Quote(vec![Inline::Text("인용문".into())]),
                Block::List(vec![
                    vec![Inline::Text("첫째".into())],
                    vec![Inline::Text("둘째".into())],
                ]),
                Block::Paragraph(vec![]),
                Block::Paragraph(vec![Inline::Text("마무리".into())]),
            ]
        );
    }

    /// 답글 시나리오가 붙여 넣는 이미지 구문이 그대로 해석되는지 검증한다.
    #[test]
    fn pasted_reply_body_renders_image_block() {
        let body = "좋은 글 감사합니다! 서점에서 찍은 책 사진이에요:\n\n![책 표지](https://example.com/book.png)";
        let blocks = parse_markup(body);
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[2],
            Block::Paragraph(vec![Inline::Image {
                alt: "책 표지".into(),
                url: "https://example.com/book.png".into(),
            }])
        );
    }
}
