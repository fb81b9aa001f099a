use super::domain::{DiagnosisOption, DiagnosisQuestion};

const fn options(
    ids: [&'static str; 3],
    amicable: &'static str,
    partial: &'static str,
    contested: &'static str,
) -> [DiagnosisOption; 3] {
    [
        DiagnosisOption {
            id: ids[0],
            text: amicable,
            score: 3,
        },
        DiagnosisOption {
            id: ids[1],
            text: partial,
            score: 2,
        },
        DiagnosisOption {
            id: ids[2],
            text: contested,
            score: 1,
        },
    ]
}

pub const MINIMUM_ANSWERS: usize = 5;

pub static QUESTIONS: [DiagnosisQuestion; 10] = [
    DiagnosisQuestion {
        id: "q1",
        category: "이혼 의사",
        text: "배우자와 이혼에 대해 합의가 되었나요?",
        options: options(
            ["q1_a", "q1_b", "q1_c"],
            "네, 서로 이혼에 동의했습니다",
            "대화 중이지만 아직 확정되지 않았습니다",
            "배우자가 이혼을 원하지 않습니다",
        ),
    },
    DiagnosisQuestion {
        id: "q2",
        category: "자녀 양육",
        text: "미성년 자녀의 친권·양육권에 대해 합의가 되었나요?",
        options: options(
            ["q2_a", "q2_b", "q2_c"],
            "합의했거나 미성년 자녀가 없습니다",
            "일부 조율이 필요합니다",
            "서로 양육권을 원해 다툼이 있습니다",
        ),
    },
    DiagnosisQuestion {
        id: "q3",
        category: "재산분할",
        text: "재산분할에 대해 의견이 일치하나요?",
        options: options(
            ["q3_a", "q3_b", "q3_c"],
            "대체로 일치합니다",
            "일부 항목에서 의견 차이가 있습니다",
            "의견 차이가 큽니다",
        ),
    },
    DiagnosisQuestion {
        id: "q4",
        category: "위자료",
        text: "위자료에 대해 합의가 가능한가요?",
        options: options(
            ["q4_a", "q4_b", "q4_c"],
            "청구 계획이 없거나 이미 합의했습니다",
            "금액 조율이 필요합니다",
            "위자료를 두고 다툼이 예상됩니다",
        ),
    },
    DiagnosisQuestion {
        id: "q5",
        category: "소통",
        text: "배우자와의 대화가 원활한가요?",
        options: options(
            ["q5_a", "q5_b", "q5_c"],
            "차분하게 대화할 수 있습니다",
            "감정적이지만 대화는 가능합니다",
            "대화가 거의 불가능합니다",
        ),
    },
    DiagnosisQuestion {
        id: "q6",
        category: "유책 사유",
        text: "혼인 파탄의 책임에 대해 다툼이 있나요?",
        options: options(
            ["q6_a", "q6_b", "q6_c"],
            "다툼이 없습니다",
            "일부 이견이 있습니다",
            "책임 소재를 두고 크게 다투고 있습니다",
        ),
    },
    DiagnosisQuestion {
        id: "q7",
        category: "안전",
        text: "가정폭력 등 안전에 대한 우려가 있나요?",
        options: options(
            ["q7_a", "q7_b", "q7_c"],
            "전혀 없습니다",
            "과거에 있었지만 현재는 없습니다",
            "현재도 우려가 있습니다",
        ),
    },
    DiagnosisQuestion {
        id: "q8",
        category: "재산 현황",
        text: "부부의 재산 현황을 서로 파악하고 있나요?",
        options: options(
            ["q8_a", "q8_b", "q8_c"],
            "모두 파악하고 있습니다",
            "일부만 알고 있습니다",
            "거의 알지 못합니다",
        ),
    },
    DiagnosisQuestion {
        id: "q9",
        category: "경제적 자립",
        text: "이혼 후 경제적 자립이 가능한가요?",
        options: options(
            ["q9_a", "q9_b", "q9_c"],
            "충분히 가능합니다",
            "일정 기간 도움이 필요합니다",
            "어려울 것 같습니다",
        ),
    },
    DiagnosisQuestion {
        id: "q10",
        category: "이혼 시기",
        text: "이혼 시기에 대해 서로 생각이 비슷한가요?",
        options: options(
            ["q10_a", "q10_b", "q10_c"],
            "서로 빠른 정리를 원합니다",
            "시기에 대해 조율이 필요합니다",
            "한쪽이 이혼을 미루거나 거부합니다",
        ),
    },
];

/// Position of `question_id` in the bank, if it exists.
pub fn position(question_id: &str) -> Option<usize> {
    QUESTIONS
        .iter()
        .position(|question| question.id == question_id)
}

pub fn find_question(question_id: &str) -> Option<&'static DiagnosisQuestion> {
    position(question_id).map(|index| &QUESTIONS[index])
}
