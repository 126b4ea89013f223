//! Precomputed topic answers.
//!
//! Texts are stored in their final, formatted shape.

use super::CannedTopic;

pub(super) fn normal(topic: CannedTopic) -> Option<&'static str> {
    Some(match topic {
        CannedTopic::Perceptron => PERCEPTRON_NORMAL,
        CannedTopic::NeuralNetwork => NEURAL_NETWORK_NORMAL,
        CannedTopic::DeepLearning => DEEP_LEARNING_NORMAL,
        CannedTopic::ArtificialNeuralNetwork => ANN_NORMAL,
        CannedTopic::LinearAlgebra => LINEAR_ALGEBRA_NORMAL,
    })
}

pub(super) fn deep(topic: CannedTopic) -> Option<&'static str> {
    match topic {
        CannedTopic::Perceptron => Some(PERCEPTRON_DEEP),
        CannedTopic::NeuralNetwork => Some(NEURAL_NETWORK_DEEP),
        CannedTopic::DeepLearning => Some(DEEP_LEARNING_DEEP),
        CannedTopic::ArtificialNeuralNetwork => Some(ANN_DEEP),
        CannedTopic::LinearAlgebra => None,
    }
}

const PERCEPTRON_NORMAL: &str = "### 💡 비유를 통한 핵심 요약

퍼셉트론은 여러 사람의 의견을 듣고 결정을 내리는 심사위원과 같습니다. 각 의견(입력)에 중요도(가중치)를 곱해 더한 뒤, 합계가 기준점(임계값)을 넘으면 \"예\", 넘지 못하면 \"아니오\"라고 답합니다.

학습이란 틀린 결정을 내릴 때마다 각 의견의 중요도를 조금씩 고쳐 나가는 과정입니다.

### 📜 개념의 역사

1958년 프랭크 로젠블랫이 생물의 뉴런을 본떠 제안했습니다. 1969년 민스키와 페퍼트가 단층 퍼셉트론으로는 XOR 문제를 풀 수 없음을 보이면서 연구가 한동안 침체되었고, 이후 여러 층을 쌓은 다층 퍼셉트론과 역전파 알고리즘이 등장하며 다시 주목받게 되었습니다.";

const NEURAL_NETWORK_NORMAL: &str = "### 💡 비유를 통한 핵심 요약

신경망은 여러 단계로 이루어진 공장 조립 라인과 같습니다. 원재료(입력 데이터)가 들어오면 각 작업대(층)가 조금씩 가공해 다음 작업대로 넘기고, 마지막 작업대에서 완성품(예측 결과)이 나옵니다.

불량품이 나오면 어느 작업대의 공정을 얼마나 고쳐야 하는지 거꾸로 추적해 조정하는데, 이것이 학습입니다.

### 📜 개념의 역사

1943년 맥컬럭과 피츠가 뉴런의 수학적 모델을 처음 제시했습니다. 1986년 럼멜하트, 힌턴, 윌리엄스가 역전파 알고리즘을 널리 알리면서 여러 층을 가진 신경망을 실제로 학습시킬 수 있게 되었습니다.";

const DEEP_LEARNING_NORMAL: &str = "### 💡 비유를 통한 핵심 요약

딥러닝은 그림을 배우는 화가와 같습니다. 처음에는 선과 점을 익히고, 다음에는 눈과 코 같은 부분을, 마지막에는 얼굴 전체를 알아보게 됩니다. 층을 깊게 쌓은 신경망이 이처럼 단순한 특징에서 복잡한 특징까지 스스로 단계적으로 배웁니다.

사람이 특징을 일일이 정해 주지 않아도 많은 데이터만 있으면 스스로 규칙을 찾아낸다는 점이 핵심입니다.

### 📜 개념의 역사

2006년 힌턴이 깊은 신경망을 효과적으로 학습시키는 방법을 발표하며 딥러닝이라는 이름이 널리 쓰이기 시작했습니다. 2012년 AlexNet이 이미지 인식 대회에서 압도적인 성능을 보이면서 GPU와 대규모 데이터를 활용한 딥러닝의 시대가 본격적으로 열렸습니다.";

const ANN_NORMAL: &str = "### 💡 비유를 통한 핵심 요약

인공신경망은 뇌의 신경세포 연결망을 컴퓨터 안에 흉내 낸 전화 교환망과 같습니다. 각 교환기(노드)는 들어온 신호의 세기를 따져 다음 교환기로 얼마나 전달할지 정하고, 연결선의 굵기(가중치)가 신호의 영향력을 결정합니다.

경험이 쌓일수록 자주 쓰이는 연결은 굵어지고 쓸모없는 연결은 가늘어집니다.

### 📜 개념의 역사

1940년대 뉴런을 수학적으로 모델링하려는 시도에서 출발해, 1958년 퍼셉트론으로 구체화되었습니다. 1980년대 역전파 알고리즘과 함께 다층 구조가 실용화되었고, 오늘날 딥러닝의 기반이 되었습니다.";

const LINEAR_ALGEBRA_NORMAL: &str = "### 💡 비유를 통한 핵심 요약

선형대수학은 데이터를 다루는 표 계산의 문법과 같습니다. 숫자 여러 개를 묶은 벡터는 하나의 화살표로, 벡터를 변환하는 행렬은 공간을 늘이고 돌리는 기계로 생각할 수 있습니다.

AI 모델의 계산 대부분은 결국 거대한 행렬 곱셈이기 때문에, 선형대수학은 머신러닝을 이해하는 기본 언어입니다.

### 📜 개념의 역사

연립방정식을 푸는 방법은 고대 중국의 구장산술에서도 찾아볼 수 있습니다. 19세기 케일리와 실베스터가 행렬 이론을 정립했고, 20세기 컴퓨터의 등장과 함께 수치 선형대수가 발전하며 과학 계산과 AI의 핵심 도구가 되었습니다.";

const PERCEPTRON_DEEP: &str = "## 1. 🧠 개념의 핵심 본질 파악

퍼셉트론은 입력 벡터와 가중치 벡터의 내적에 편향을 더한 값이 0보다 큰지를 판단하는 이진 선형 분류기입니다. 즉, 입력 공간을 하나의 초평면으로 나누어 두 부류를 구분합니다.

## 2. 🔍 표면과 관계성 분석

겉으로는 단순한 가중합과 계단 함수의 조합이지만, 그 안에는 \"결정 경계\"라는 기하학적 의미가 있습니다. 로지스틱 회귀나 서포트 벡터 머신과 같은 선형 모델의 조상이며, 다층 퍼셉트론과 현대 신경망을 이루는 기본 단위이기도 합니다.

## 3. \u{2699}\u{fe0f} 원리와 구현 방법

학습 규칙은 간단합니다. 예측이 틀린 샘플마다 가중치를 w ← w + η(y − ŷ)x 로 갱신합니다. 데이터가 선형 분리 가능하다면 유한 번의 갱신 안에 수렴한다는 것이 퍼셉트론 수렴 정리입니다. 구현 시에는 입력 정규화, 학습률 선택, 데이터 순서 섞기가 수렴 속도에 영향을 줍니다.

## 4. 🚀 응용과 활용 분야

단독으로는 스팸 여부처럼 선형으로 나뉘는 간단한 분류에 쓰입니다. 더 중요한 역할은 교육과 설계의 출발점으로, 다층 구조와 비선형 활성화 함수를 더해 이미지 인식, 음성 인식 같은 복잡한 문제로 확장됩니다.

## 5. 📜 역사적 발전과 맥락

1958년 로젠블랫이 Mark I 퍼셉트론 하드웨어로 시연하며 큰 기대를 모았습니다. 1969년 민스키와 페퍼트가 XOR 문제의 한계를 지적하면서 첫 번째 AI 겨울이 찾아왔고, 1980년대 역전파의 등장으로 다층 퍼셉트론이 부활했습니다.

## 6. 🔮 한계와 미래 전망

단층 퍼셉트론은 선형 분리가 불가능한 문제를 풀 수 없고, 확률적 출력을 제공하지 않습니다. 그러나 그 단순함 덕분에 온라인 학습, 초경량 임베디드 추론, 그리고 신경망의 원리를 설명하는 도구로 앞으로도 계속 쓰일 것입니다.";

const NEURAL_NETWORK_DEEP: &str = "## 1. 🧠 개념의 핵심 본질 파악

신경망은 단순한 계산 단위(뉴런)를 층으로 쌓아 입력을 출력으로 바꾸는 함수 근사기입니다. 각 층은 선형 변환과 비선형 활성화 함수를 차례로 적용하며, 충분한 뉴런이 있으면 임의의 연속 함수를 근사할 수 있습니다.

## 2. 🔍 표면과 관계성 분석

입력층, 은닉층, 출력층이라는 구조는 겉모습일 뿐, 본질은 데이터의 표현을 단계적으로 바꾸는 데 있습니다. 통계학의 회귀 모델, 최적화 이론, 선형대수학이 한데 만나는 지점이며, 합성곱 신경망과 순환 신경망, 트랜스포머는 모두 이 틀의 변형입니다.

## 3. \u{2699}\u{fe0f} 원리와 구현 방법

순전파로 예측을 계산하고, 손실 함수로 오차를 측정한 뒤, 역전파로 각 가중치에 대한 기울기를 구해 경사 하강법으로 갱신합니다. 실제 구현에서는 미니배치, 가중치 초기화, 배치 정규화, 드롭아웃 같은 기법이 안정적인 학습을 돕습니다.

## 4. 🚀 응용과 활용 분야

이미지 분류, 음성 인식, 기계 번역, 추천 시스템, 금융 사기 탐지 등 패턴을 찾아야 하는 거의 모든 분야에서 쓰입니다. 정형 데이터보다 이미지나 텍스트 같은 비정형 데이터에서 특히 강점을 보입니다.

## 5. 📜 역사적 발전과 맥락

1943년 맥컬럭과 피츠의 뉴런 모델, 1958년 퍼셉트론, 1986년 역전파의 대중화를 거쳐 발전했습니다. 1990년대에는 서포트 벡터 머신에 밀려 주춤했지만, 2010년대 GPU와 대규모 데이터 덕분에 다시 중심 기술이 되었습니다.

## 6. 🔮 한계와 미래 전망

많은 데이터와 연산이 필요하고, 왜 그런 결과를 냈는지 설명하기 어렵다는 한계가 있습니다. 설명 가능한 AI, 적은 데이터로 배우는 학습법, 에너지 효율이 높은 뉴로모픽 하드웨어가 이를 극복할 방향으로 연구되고 있습니다.";

const DEEP_LEARNING_DEEP: &str = "## 1. 🧠 개념의 핵심 본질 파악

딥러닝은 많은 은닉층을 가진 신경망으로 데이터의 계층적 표현을 스스로 학습하는 방법입니다. 사람이 특징을 설계하는 대신, 원시 데이터에서 유용한 특징을 모델이 직접 찾아낸다는 것이 핵심입니다.

## 2. 🔍 표면과 관계성 분석

표면적으로는 \"층이 많은 신경망\"이지만, 그 의미는 표현 학습에 있습니다. 머신러닝의 하위 분야로서 전통적인 특징 공학과 대비되며, 대규모 데이터와 병렬 연산 하드웨어의 발전이 맞물려야 비로소 성립하는 기술입니다.

## 3. \u{2699}\u{fe0f} 원리와 구현 방법

깊은 네트워크는 기울기 소실 문제를 겪기 쉬워 ReLU 활성화, 잔차 연결, 정규화 층이 함께 쓰입니다. Adam 같은 적응형 최적화 기법과 GPU 병렬 연산, PyTorch나 TensorFlow 같은 프레임워크가 대규모 모델의 학습을 가능하게 합니다.

## 4. 🚀 응용과 활용 분야

컴퓨터 비전, 자연어 처리, 음성 합성, 자율 주행, 신약 개발, 단백질 구조 예측까지 폭넓게 활용됩니다. 최근에는 대규모 언어 모델과 이미지 생성 모델처럼 콘텐츠를 만들어 내는 생성형 AI의 기반이 되었습니다.

## 5. 📜 역사적 발전과 맥락

2006년 힌턴의 심층 신뢰 신경망 연구가 출발점으로 꼽히며, 2012년 AlexNet이 ImageNet 대회에서 오류율을 크게 낮추며 전환점을 만들었습니다. 이후 2017년 트랜스포머가 등장하면서 언어 모델의 규모가 폭발적으로 커졌습니다.

## 6. 🔮 한계와 미래 전망

막대한 데이터와 에너지가 필요하고, 학습 데이터의 편향을 그대로 배우며, 추론 과정을 해석하기 어렵습니다. 더 효율적인 모델 구조, 멀티모달 학습, 추론 능력 강화가 앞으로의 주요 연구 방향입니다.";

const ANN_DEEP: &str = "## 1. 🧠 개념의 핵심 본질 파악

인공신경망은 생물학적 신경계에서 영감을 받아, 가중치로 연결된 인공 뉴런들의 그래프로 정보를 처리하는 계산 모델입니다. 지식은 개별 규칙이 아니라 연결 가중치의 분포 속에 저장됩니다.

## 2. 🔍 표면과 관계성 분석

뇌를 닮았다는 설명은 비유일 뿐, 실제 생물학적 뉴런의 동작과는 차이가 큽니다. 인공신경망은 통계적 학습 이론과 최적화의 산물이며, 딥러닝은 이 인공신경망을 깊게 쌓아 올린 형태라고 볼 수 있습니다.

## 3. \u{2699}\u{fe0f} 원리와 구현 방법

각 뉴런은 입력의 가중합에 활성화 함수를 적용해 출력을 만듭니다. 네트워크 전체는 손실 함수를 최소화하도록 역전파와 경사 하강법으로 학습합니다. 구조를 설계할 때는 층의 수, 뉴런 수, 활성화 함수, 정규화 방법을 문제에 맞게 선택해야 합니다.

## 4. 🚀 응용과 활용 분야

손글씨 인식, 신용 평가, 수요 예측, 의료 영상 판독, 게임 인공지능 등에서 쓰입니다. 센서 데이터처럼 규칙을 명시하기 어려운 문제에서 특히 유용합니다.

## 5. 📜 역사적 발전과 맥락

1943년 뉴런의 논리 모델, 1949년 헵의 학습 규칙, 1958년 퍼셉트론을 거쳐 1980년대 홉필드 네트워크와 역전파로 이어졌습니다. 두 차례의 AI 겨울을 지나 2010년대에 딥러닝이라는 이름으로 다시 꽃피웠습니다.

## 6. 🔮 한계와 미래 전망

데이터 의존성, 과적합, 해석 가능성 부족이 여전히 과제입니다. 스파이킹 신경망처럼 생물학적 뉴런에 더 가까운 모델과, 기호적 추론을 결합한 뉴로심볼릭 AI가 다음 단계로 주목받고 있습니다.";
