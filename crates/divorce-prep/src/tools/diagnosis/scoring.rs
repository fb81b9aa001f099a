use chrono::Utc;

use super::domain::{DiagnosisAnswer, DiagnosisResult, DiagnosisResultDetail, DiagnosisResultType};
use super::questions::QUESTIONS;

pub const AGREEMENT_MIN_SCORE: u32 = 25;
pub const MEDIATION_MIN_SCORE: u32 = 15;

pub fn score(answers: &[DiagnosisAnswer]) -> u32 {
    answers.iter().map(|answer| u32::from(answer.score)).sum()
}

/// Map a total score onto the three closed, non-overlapping result ranges.
pub fn classify(score: u32) -> DiagnosisResultType {
    if score >= AGREEMENT_MIN_SCORE {
        DiagnosisResultType::Agreement
    } else if score >= MEDIATION_MIN_SCORE {
        DiagnosisResultType::Mediation
    } else {
        DiagnosisResultType::Litigation
    }
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    AtLeast(u8),
    AtMost(u8),
}

impl Trigger {
    fn fires(self, score: u8) -> bool {
        match self {
            Trigger::AtLeast(threshold) => score >= threshold,
            Trigger::AtMost(threshold) => score <= threshold,
        }
    }
}

struct ReasonRule {
    question_id: &'static str,
    trigger: Trigger,
    reason: &'static str,
}

static REASON_RULES: [ReasonRule; 11] = [
    ReasonRule {
        question_id: "q1",
        trigger: Trigger::AtLeast(3),
        reason: "부부 모두 이혼에 동의하고 있어 협의이혼 절차를 진행할 수 있습니다.",
    },
    ReasonRule {
        question_id: "q1",
        trigger: Trigger::AtMost(1),
        reason: "배우자가 이혼에 동의하지 않아 재판상 이혼 절차가 필요할 수 있습니다.",
    },
    ReasonRule {
        question_id: "q2",
        trigger: Trigger::AtLeast(3),
        reason: "자녀 양육에 관한 합의가 이루어져 있습니다.",
    },
    ReasonRule {
        question_id: "q2",
        trigger: Trigger::AtMost(1),
        reason: "양육권 분쟁이 예상되어 가정법원의 판단이 필요할 수 있습니다.",
    },
    ReasonRule {
        question_id: "q3",
        trigger: Trigger::AtMost(1),
        reason: "재산분할에 대한 의견 차이가 커 조정이나 소송이 필요할 수 있습니다.",
    },
    ReasonRule {
        question_id: "q4",
        trigger: Trigger::AtMost(1),
        reason: "위자료 청구를 두고 다툼이 예상됩니다.",
    },
    ReasonRule {
        question_id: "q5",
        trigger: Trigger::AtLeast(3),
        reason: "배우자와 원활한 대화가 가능해 합의에 유리합니다.",
    },
    ReasonRule {
        question_id: "q5",
        trigger: Trigger::AtMost(1),
        reason: "배우자와 대화가 어려워 제3자의 중재가 필요합니다.",
    },
    ReasonRule {
        question_id: "q6",
        trigger: Trigger::AtMost(1),
        reason: "유책 사유에 대한 다툼이 있어 증거 준비가 중요합니다.",
    },
    ReasonRule {
        question_id: "q7",
        trigger: Trigger::AtMost(2),
        reason: "가정폭력 이력이 있어 안전을 우선으로 절차를 준비해야 합니다.",
    },
    ReasonRule {
        question_id: "q7",
        trigger: Trigger::AtMost(1),
        reason: "현재 안전 우려가 있어 접근금지 등 보호 조치를 먼저 검토해야 합니다.",
    },
];

const fn generic_reason(result_type: DiagnosisResultType) -> &'static str {
    match result_type {
        DiagnosisResultType::Agreement => "전반적으로 배우자와 합의할 수 있는 여지가 큽니다.",
        DiagnosisResultType::Mediation => "일부 쟁점에 대해 제3자의 조율이 필요한 상황입니다.",
        DiagnosisResultType::Litigation => {
            "주요 쟁점에 대한 의견 차이가 커 법적 절차가 필요할 수 있습니다."
        }
    }
}

const fn next_steps(result_type: DiagnosisResultType) -> &'static [&'static str] {
    match result_type {
        DiagnosisResultType::Agreement => &[
            "협의이혼의사확인신청서 작성 및 관할 가정법원 제출",
            "이혼 안내 프로그램 이수 (미성년 자녀가 있으면 자녀양육안내 포함)",
            "자녀 양육사항 및 친권자 결정에 관한 협의서 준비",
            "숙려기간 경과 후 확인기일 출석",
            "이혼신고서 제출",
        ],
        DiagnosisResultType::Mediation => &[
            "쟁점별 요구 사항과 양보 가능한 범위 정리",
            "재산 목록과 소득 자료 등 증빙 서류 준비",
            "가정법원에 이혼 조정 신청",
            "조정기일 출석 및 조정안 검토",
            "조정 불성립 시 소송 전환 검토",
        ],
        DiagnosisResultType::Litigation => &[
            "이혼 전문 변호사 상담",
            "유책 사유와 재산 관련 증거 수집",
            "필요 시 재산 가압류 등 보전처분 신청",
            "이혼 소장 작성 및 가정법원 제출",
            "변론기일 준비 및 출석",
        ],
    }
}

/// Build the canned explanation for `result_type` from the answers that trip a rule.
pub fn explain(
    result_type: DiagnosisResultType,
    answers: &[DiagnosisAnswer],
) -> DiagnosisResultDetail {
    let mut reasons = Vec::new();
    for rule in &REASON_RULES {
        let fired = answers
            .iter()
            .filter(|answer| answer.question_id == rule.question_id)
            .any(|answer| rule.trigger.fires(answer.score));
        if fired {
            reasons.push(rule.reason.to_string());
        }
    }

    if reasons.is_empty() {
        reasons.push(generic_reason(result_type).to_string());
    }

    DiagnosisResultDetail {
        estimated_duration: result_type.estimated_duration().to_string(),
        reasons,
        next_steps: next_steps(result_type)
            .iter()
            .map(|step| step.to_string())
            .collect(),
    }
}

/// Score, classify and explain a set of answers.
pub fn diagnose(answers: &[DiagnosisAnswer]) -> DiagnosisResult {
    let score = score(answers);
    let result_type = classify(score);

    DiagnosisResult {
        result_type,
        score,
        total_questions: QUESTIONS.len(),
        answered_questions: answers.len(),
        detail: explain(result_type, answers),
        created_at: Utc::now(),
    }
}
