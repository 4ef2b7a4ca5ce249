use crate::domain::contract;
use crate::domain::model::UserInput;

/// Substituted for the birth time when it is unknown; asks for a three-pillar reading.
pub const UNKNOWN_BIRTH_TIME: &str = "모름 (시간 모름으로 간주하고 삼주로 분석)";

const SYSTEM_INSTRUCTION_HEAD: &str = r#"당신은 40년 경력의 정통 명리학자입니다. 사용자의 생년월일시를 바탕으로 사주팔자(四柱八字)를 세우고,
오행의 균형과 십신, 대운과 세운의 흐름을 근거로 요청된 주제의 운세를 분석합니다.
어조는 품격 있고 따뜻하게 유지하되, 근거 없는 공포나 단정적인 예언은 피하십시오.

출력 형식 규칙:
- 큰 제목은 '## ', 소제목은 '### ' 로 시작합니다.
- 구간을 나눌 때는 '---' 한 줄을 사용합니다.
- 목록은 '* ' 로 시작하고, 강조는 **굵게** 로 표시합니다.
- 표, 인용, 번호 목록, 코드 블록은 사용하지 않습니다. (아래 데이터 블록은 예외)
- 일반 버전은 약 2000자로 핵심을 요약하고, 심층 버전은 약 3000자로 월별 흐름까지 상세히 풀어 씁니다.
- 태어난 시간을 모르는 경우 시주를 제외한 삼주(년주, 월주, 일주)로 분석하고 그 사실을 밝힙니다."#;

/// Persona and output rules sent alongside every prompt.
pub fn system_instruction() -> String {
    format!(
        "{head}\n\n데이터 블록 규칙:\n\
         응답의 맨 마지막에 목표 연도 1월부터 12월까지의 월별 운세 지수를 아래 형식의 블록으로 반드시 덧붙입니다.\n\
         score 는 0에서 100 사이의 정수, keyword 는 두세 단어 이내의 짧은 문구입니다.\n\
         블록은 \"{open}\" 으로 시작하고 \"{close}\" 로 끝나며, 그 안에는 JSON 배열만 넣습니다.\n\n{example}",
        head = SYSTEM_INSTRUCTION_HEAD,
        open = contract::opening_fence(),
        close = contract::FENCE,
        example = contract::example_block(),
    )
}

pub fn build_prompt(input: &UserInput) -> String {
    let birth_time = if input.has_birth_time() {
        input.birth_time.trim()
    } else {
        UNKNOWN_BIRTH_TIME
    };

    format!(
        "사용자 정보:\n\
         이름: {name}\n\
         성별: {gender}\n\
         생년월일: {year}년 {month}월 {day}일\n\
         태어난 시간: {birth_time}\n\
         \n\
         분석 요청 사항:\n\
         목표 연도: {target}년\n\
         분석 주제: {topic}\n\
         분석 모드: {detail}\n\
         \n\
         위 정보를 바탕으로 사주를 분석해주세요.\n\
         마지막에 {lang} 데이터를 반드시 포함해야 합니다.",
        name = input.name,
        gender = input.gender.label(),
        year = input.birth_year,
        month = input.birth_month,
        day = input.birth_day,
        birth_time = birth_time,
        target = input.target_year,
        topic = input.topic.label(),
        detail = input.detail_level.label(),
        lang = contract::FENCE_LANG.to_uppercase(),
    )
}
