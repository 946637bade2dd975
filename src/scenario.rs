use crate::sim::{ComposerTool, TargetId};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 스크립트 검증 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// 액션 목록이 비어 있는 경우이다.
    #[error("액션 목록이 비어 있습니다.")]
    EmptyScript,
    /// 첫 액션이 상태를 초기화하는 안내가 아닌 경우이다.
    #[error("스크립트는 reset이 켜진 안내(announce) 액션으로 시작해야 합니다.")]
    MissingOpeningReset,
    /// 회차 중간에 초기화 안내가 다시 나타난 경우이다.
    #[error("상태 초기화는 회차당 한 번만 허용됩니다. (액션 {0}번)")]
    ResetMidPass(usize),
    /// 안내 문구가 비어 있는 경우이다.
    #[error("안내 문구가 비어 있습니다. (액션 {0}번)")]
    EmptyInstruction(usize),
}

/// 입력이 누적되는 대상 필드를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeField {
    /// 작성기 제목 입력란.
    Title,
    /// 작성기 본문 편집 영역.
    Body,
}

/// 누름 동작이 끝난 직후 적용되는 UI 부수 효과이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressEffect {
    /// 작성기 패널을 연다.
    OpenComposer,
    /// 내용을 등록하고 작성기를 닫는다.
    Submit,
    /// 서식 도구를 강조 표시한다.
    ActivateTool {
        /// 강조할 도구.
        tool: ComposerTool,
    },
    /// 알림 설정 메뉴를 연다.
    OpenWatchMenu,
    /// '알림 받기'를 선택하고 메뉴를 닫는다.
    SelectWatching,
    /// 사용자 카드를 연다.
    OpenUserCard,
}

/// 드라이버가 해석하는 최소 실행 단위이다.
///
/// 안무 전체가 제어 흐름이 아닌 데이터로 표현되도록, 시나리오는
/// 이 액션들의 순서 있는 목록으로만 구성된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// 단계 번호와 안내 문구를 갱신한다.
    Announce {
        /// 갱신할 단계 번호. 생략하면 문구만 바꾼다.
        #[serde(default)]
        step: Option<u32>,
        /// 표시할 안내 문구.
        instruction: String,
        /// 회차 시작 기본값으로 상태를 되돌릴지 여부.
        #[serde(default)]
        reset: bool,
        /// 안내 직후 유지할 대기 시간(밀리초).
        #[serde(default)]
        hold_ms: u64,
    },
    /// 커서를 타겟 중심으로 이동한다.
    Move {
        /// 이동할 타겟.
        target: TargetId,
    },
    /// 타겟 위에서 누름 동작을 연출하고 부수 효과를 적용한다.
    Press {
        /// 누를 타겟.
        target: TargetId,
        /// 누름 이후 적용할 부수 효과.
        #[serde(default)]
        effect: Option<PressEffect>,
    },
    /// 문자열을 한 글자씩 타이핑한다.
    Type {
        /// 입력 대상 필드.
        field: TypeField,
        /// 입력할 문자열.
        text: String,
    },
    /// 문자열을 한 번에 붙여 넣는다.
    Paste {
        /// 입력 대상 필드.
        field: TypeField,
        /// 붙여 넣을 문자열.
        text: String,
    },
    /// 강조 표시할 서식 도구를 바꾸거나 해제한다.
    Tool {
        /// 강조할 도구. 생략하면 해제한다.
        #[serde(default)]
        tool: Option<ComposerTool>,
    },
    /// 상태 변화 없이 잠시 멈춘다.
    Pause {
        /// 대기 시간(밀리초). 생략하면 읽기 대기 시간을 사용한다.
        #[serde(default)]
        ms: Option<u64>,
    },
}

/// 시나리오 전체의 진행 속도를 결정하는 상수들이다.
///
/// 값을 바꿔도 액션 순서는 변하지 않고 속도만 달라진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// 키 입력 한 글자당 간격(밀리초).
    #[serde(default = "default_keystroke_ms")]
    pub keystroke_ms: u64,
    /// 커서 이동 한 번에 걸리는 시간(밀리초).
    #[serde(default = "default_move_ms")]
    pub move_ms: u64,
    /// 화면을 읽을 시간을 주는 대기 시간(밀리초).
    #[serde(default = "default_reading_ms")]
    pub reading_ms: u64,
}

impl Default for Pacing {
    /// 기본 진행 속도를 정의한다.
    fn default() -> Self {
        Self {
            keystroke_ms: default_keystroke_ms(),
            move_ms: default_move_ms(),
            reading_ms: default_reading_ms(),
        }
    }
}

fn default_keystroke_ms() -> u64 {
    140
}

fn default_move_ms() -> u64 {
    2200
}

fn default_reading_ms() -> u64 {
    4000
}

/// Scenario는 하나의 안내 안무 전체를 표현하는 데이터 정의다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// 시나리오의 표시 이름.
    pub name: String,
    /// 진행 속도 설정.
    #[serde(default)]
    pub pacing: Pacing,
    /// 순서대로 실행할 액션 목록.
    pub actions: Vec<Action>,
}

impl Scenario {
    /// 전체 액션 수를 반환한다.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// 액션 목록이 비었는지 여부를 확인한다.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// 안내 단계의 최댓값을 반환한다. 안내 버블의 "k / n" 표기에 쓴다.
    pub fn step_count(&self) -> u32 {
        self.actions
            .iter()
            .filter_map(|action| match action {
                Action::Announce { step, .. } => *step,
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// 스크립트가 드라이버 불변식을 지키는지 검사한다.
    ///
    /// 회차당 정확히 한 번, 첫 액션에서만 상태 초기화가 일어나야 한다.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.actions.is_empty() {
            return Err(ScenarioError::EmptyScript);
        }
        match &self.actions[0] {
            Action::Announce { reset: true, .. } => {}
            _ => return Err(ScenarioError::MissingOpeningReset),
        }
        for (index, action) in self.actions.iter().enumerate() {
            if let Action::Announce {
                reset, instruction, ..
            } = action
            {
                if *reset && index > 0 {
                    return Err(ScenarioError::ResetMidPass(index + 1));
                }
                if instruction.trim().is_empty() {
                    return Err(ScenarioError::EmptyInstruction(index + 1));
                }
            }
        }
        Ok(())
    }
}

/// 내장 시나리오를 선택하는 식별자이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    /// 새 글 작성 안내.
    Create,
    /// 답글 작성 안내.
    Reply,
    /// 게시글 알림 설정 안내.
    Follow,
    /// 사용자 카드 열람 안내.
    UserInfo,
}

impl ScenarioKind {
    /// 모든 내장 시나리오를 아코디언 표시 순서대로 나열한다.
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::Create,
        ScenarioKind::Reply,
        ScenarioKind::Follow,
        ScenarioKind::UserInfo,
    ];

    /// 아코디언 제목으로 쓸 안내 문구를 반환한다.
    pub fn heading(&self) -> &'static str {
        match self {
            ScenarioKind::Create => "새 글은 어떻게 쓰나요?",
            ScenarioKind::Reply => "답글과 이미지는 어떻게 올리나요?",
            ScenarioKind::Follow => "게시글 알림은 어떻게 받나요?",
            ScenarioKind::UserInfo => "작성자 정보는 어디서 보나요?",
        }
    }

    /// 해당 시나리오의 내장 스크립트를 복제해 반환한다.
    pub fn script(&self) -> Scenario {
        static BUILTIN: Lazy<Vec<(ScenarioKind, Scenario)>> = Lazy::new(|| {
            vec![
                (ScenarioKind::Create, create_script()),
                (ScenarioKind::Reply, reply_script()),
                (ScenarioKind::Follow, follow_script()),
                (ScenarioKind::UserInfo, user_info_script()),
            ]
        });
        BUILTIN
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, scenario)| scenario.clone())
            .unwrap_or_else(create_script)
    }
}

/// 새 글 작성 시나리오를 구성한다.
fn create_script() -> Scenario {
    Scenario {
        name: "새 글 쓰기".into(),
        pacing: Pacing::default(),
        actions: vec![
            Action::Announce {
                step: Some(1),
                instruction: "새 글을 쓰려면 '새 글 쓰기' 버튼을 누르세요".into(),
                reset: true,
                hold_ms: 2000,
            },
            Action::Move {
                target: TargetId::NewTopicButton,
            },
            Action::Press {
                target: TargetId::NewTopicButton,
                effect: Some(PressEffect::OpenComposer),
            },
            Action::Pause { ms: Some(1500) },
            Action::Announce {
                step: Some(2),
                instruction: "명확하고 구체적인 제목을 입력하세요".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Move {
                target: TargetId::TitleInput,
            },
            Action::Type {
                field: TypeField::Title,
                text: "이번 주에 나온 새 책 추천".into(),
            },
            Action::Pause { ms: Some(1500) },
            Action::Announce {
                step: Some(3),
                instruction: "본문을 쓰면서 책 제목을 굵게 강조해 봅니다".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Move {
                target: TargetId::BodyEditor,
            },
            Action::Type {
                field: TypeField::Body,
                text: "가족 모두에게 추천하고 싶은 책 ".into(),
            },
            Action::Announce {
                step: None,
                instruction: "B 버튼을 눌러 굵게 쓰기를 켭니다".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Move {
                target: TargetId::BoldButton,
            },
            Action::Press {
                target: TargetId::BoldButton,
                effect: Some(PressEffect::ActivateTool {
                    tool: ComposerTool::Bold,
                }),
            },
            Action::Move {
                target: TargetId::BodyEditor,
            },
            Action::Type {
                field: TypeField::Body,
                text: "**『마음의 빛』**".into(),
            },
            Action::Tool { tool: None },
            Action::Type {
                field: TypeField::Body,
                text: " 정말 따뜻한 이야기입니다.".into(),
            },
            Action::Pause { ms: None },
            Action::Announce {
                step: Some(4),
                instruction: "마지막으로 등록 버튼을 누릅니다".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Move {
                target: TargetId::SubmitButton,
            },
            Action::Press {
                target: TargetId::SubmitButton,
                effect: Some(PressEffect::Submit),
            },
            Action::Pause { ms: None },
        ],
    }
}

/// 답글 작성 시나리오를 구성한다.
fn reply_script() -> Scenario {
    Scenario {
        name: "답글 쓰기".into(),
        pacing: Pacing::default(),
        actions: vec![
            Action::Announce {
                step: Some(1),
                instruction: "글에 답하려면 '답글' 버튼을 누르세요".into(),
                reset: true,
                hold_ms: 2000,
            },
            Action::Move {
                target: TargetId::ReplyButton,
            },
            Action::Press {
                target: TargetId::ReplyButton,
                effect: Some(PressEffect::OpenComposer),
            },
            Action::Pause { ms: Some(1500) },
            Action::Announce {
                step: Some(2),
                instruction: "답글을 쓰고 사진을 한 장 붙여 봅니다".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Move {
                target: TargetId::BodyEditor,
            },
            Action::Type {
                field: TypeField::Body,
                text: "좋은 글 감사합니다! 서점에서 찍은 책 사진이에요:".into(),
            },
            Action::Paste {
                field: TypeField::Body,
                text: "\n\n![책 표지](https://example.com/book.png)".into(),
            },
            Action::Pause { ms: Some(2500) },
            Action::Announce {
                step: Some(3),
                instruction: "답글을 등록합니다".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Move {
                target: TargetId::SubmitButton,
            },
            Action::Press {
                target: TargetId::SubmitButton,
                effect: Some(PressEffect::Submit),
            },
            Action::Pause { ms: None },
        ],
    }
}

/// 알림 설정 시나리오를 구성한다.
fn follow_script() -> Scenario {
    Scenario {
        name: "알림 받기".into(),
        pacing: Pacing::default(),
        actions: vec![
            Action::Announce {
                step: Some(1),
                instruction: "알림을 받고 싶다면 알림 설정(종) 버튼을 찾으세요".into(),
                reset: true,
                hold_ms: 2500,
            },
            Action::Move {
                target: TargetId::WatchButton,
            },
            Action::Press {
                target: TargetId::WatchButton,
                effect: Some(PressEffect::OpenWatchMenu),
            },
            Action::Pause { ms: Some(1500) },
            Action::Announce {
                step: Some(2),
                instruction: "열린 메뉴에서 '알림 받기'를 선택하세요".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Move {
                target: TargetId::WatchMenuOption,
            },
            Action::Press {
                target: TargetId::WatchMenuOption,
                effect: Some(PressEffect::SelectWatching),
            },
            Action::Pause { ms: Some(1000) },
            Action::Announce {
                step: None,
                instruction: "좋습니다! 이제 새 답글이 달릴 때마다 알림이 도착합니다".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Pause { ms: None },
        ],
    }
}

/// 사용자 카드 열람 시나리오를 구성한다.
fn user_info_script() -> Scenario {
    Scenario {
        name: "작성자 정보 보기".into(),
        pacing: Pacing::default(),
        actions: vec![
            Action::Announce {
                step: Some(1),
                instruction: "작성자가 궁금하다면 프로필 사진을 눌러 보세요".into(),
                reset: true,
                hold_ms: 2000,
            },
            Action::Move {
                target: TargetId::AuthorAvatar,
            },
            Action::Press {
                target: TargetId::AuthorAvatar,
                effect: Some(PressEffect::OpenUserCard),
            },
            Action::Pause { ms: Some(1500) },
            Action::Announce {
                step: Some(2),
                instruction: "사용자 카드에서 가입일과 최근 활동을 확인할 수 있습니다".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Pause { ms: Some(2500) },
            Action::Announce {
                step: Some(3),
                instruction: "'메시지 보내기'를 누르면 바로 쪽지를 쓸 수 있습니다".into(),
                reset: false,
                hold_ms: 0,
            },
            Action::Move {
                target: TargetId::MessageButton,
            },
            Action::Press {
                target: TargetId::MessageButton,
                effect: None,
            },
            Action::Pause { ms: None },
        ],
    }
}

/// YAML 파일을 읽어 Scenario로 역직렬화하고 검증한다.
pub fn load_scenario_from_file(path: &Path) -> anyhow::Result<Scenario> {
    let mut file = File::open(path)?;
    load_scenario_from_reader(&mut file)
}

/// Reader에서 YAML을 읽어 Scenario 구조체로 파싱하고 검증한다.
pub fn load_scenario_from_reader<R: Read>(reader: &mut R) -> anyhow::Result<Scenario> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    let scenario: Scenario = serde_yaml::from_str(&buf)?;
    scenario.validate()?;
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 모든 내장 스크립트가 검증을 통과하는지 확인한다.
    #[test]
    fn builtin_scripts_are_valid() {
        for kind in ScenarioKind::ALL {
            let scenario = kind.script();
            assert!(!scenario.is_empty(), "{kind:?} 스크립트가 비어 있습니다");
            scenario
                .validate()
                .unwrap_or_else(|err| panic!("{kind:?} 검증 실패: {err}"));
            assert!(scenario.step_count() >= 1);
        }
    }

    /// 내장 스크립트의 단계 번호가 1부터 빈틈없이 증가하는지 확인한다.
    #[test]
    fn builtin_step_numbers_are_contiguous() {
        for kind in ScenarioKind::ALL {
            let scenario = kind.script();
            let mut expected = 1;
            for action in &scenario.actions {
                if let Action::Announce {
                    step: Some(step), ..
                } = action
                {
                    assert_eq!(*step, expected, "{kind:?}의 단계 번호가 어긋났습니다");
                    expected += 1;
                }
            }
        }
    }

    /// 사용자 정의 YAML 스크립트 파싱을 검증한다.
    #[test]
    fn parses_custom_script_yaml() {
        let yaml = r#"
name: 사용자 스크립트
pacing:
  keystroke_ms: 50
actions:
  - action: announce
    step: 1
    instruction: 시작합니다
    reset: true
    hold_ms: 500
  - action: move
    target: reply_button
  - action: press
    target: reply_button
    effect: open_composer
  - action: type
    field: body
    text: 안녕하세요
  - action: pause
"#;
        let scenario = load_scenario_from_reader(&mut yaml.as_bytes()).expect("YAML 파싱 실패");
        assert_eq!(scenario.len(), 5);
        assert_eq!(scenario.pacing.keystroke_ms, 50);
        assert_eq!(scenario.pacing.move_ms, default_move_ms());
        assert_eq!(scenario.step_count(), 1);
        assert!(matches!(
            scenario.actions[2],
            Action::Press {
                target: TargetId::ReplyButton,
                effect: Some(PressEffect::OpenComposer),
            }
        ));
    }

    /// 초기화 안내 없이 시작하는 스크립트를 거부하는지 확인한다.
    #[test]
    fn rejects_script_without_opening_reset() {
        let scenario = Scenario {
            name: "잘못된 스크립트".into(),
            pacing: Pacing::default(),
            actions: vec![Action::Pause { ms: Some(100) }],
        };
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::MissingOpeningReset)
        ));
    }

    /// 회차 중간의 초기화를 거부하는지 확인한다.
    #[test]
    fn rejects_mid_pass_reset() {
        let mut scenario = ScenarioKind::Follow.script();
        scenario.actions.push(Action::Announce {
            step: Some(9),
            instruction: "다시 초기화".into(),
            reset: true,
            hold_ms: 0,
        });
        assert!(matches!(
            scenario.validate(),
            Err(ScenarioError::ResetMidPass(_))
        ));
    }
}
