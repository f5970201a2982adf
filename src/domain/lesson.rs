pub struct QuizQuestion {
    pub question: &'static str,
    pub options: &'static [&'static str],
    /// Index into `options`.
    pub answer: usize,
}

pub struct Lesson {
    pub name: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub quiz: &'static [QuizQuestion],
}

pub const LESSONS: &[Lesson] = &[
    Lesson {
        name: "Introduction to CBT",
        title: "Understanding Cognitive Behavioral Therapy",
        text: "Cognitive Behavioral Therapy (CBT) is a structured, goal-oriented form of talk \
therapy. It helps you notice inaccurate or negative thinking so you can see difficult \
situations more clearly and respond to them more effectively.

CBT is used for depression, anxiety disorders, phobias and many other difficulties. It is \
not about ignoring problems or forcing yourself to be cheerful. It is about building more \
balanced ways of thinking and coping.

The basic steps are:
1. Identify troubling situations in your life.
2. Notice your thoughts, emotions and beliefs about them.
3. Spot negative or inaccurate thinking.
4. Reshape that thinking into something more balanced.",
        quiz: &[
            QuizQuestion {
                question: "What is a core aim of CBT?",
                options: &[
                    "Avoiding all negative emotions.",
                    "Uncovering repressed childhood memories.",
                    "Identifying and reshaping inaccurate or negative thinking.",
                    "Prescribing medication.",
                ],
                answer: 2,
            },
            QuizQuestion {
                question: "Which of these is NOT one of the basic steps of CBT?",
                options: &[
                    "Identifying troubling situations.",
                    "Noticing thoughts and emotions.",
                    "Reliving past traumatic experiences repeatedly.",
                    "Reshaping negative thinking.",
                ],
                answer: 2,
            },
        ],
    },
    Lesson {
        name: "Thoughts, Emotions, and Behaviors",
        title: "The CBT Triangle",
        text: "The CBT triangle links three things that constantly influence each other:

* Thoughts: what you tell yourself, your interpretations, beliefs and assumptions.
* Emotions: how you feel, such as sadness, anxiety, anger or joy.
* Behaviors: what you do, or avoid doing.

Change one corner and the other two shift as well. Replacing \"I'm useless\" with \"I made \
a mistake and can learn from it\" can move you from sadness towards hope, and from \
withdrawing towards trying again. Acting differently works the other way round: finishing \
a task you were putting off tends to bring more confident thoughts and a sense of mastery.",
        quiz: &[
            QuizQuestion {
                question: "Which three elements make up the CBT triangle?",
                options: &[
                    "Past, present and future",
                    "Thoughts, emotions and behaviors",
                    "Body, mind and spirit",
                    "Work, rest and play",
                ],
                answer: 1,
            },
            QuizQuestion {
                question: "If you change a negative thought, what else is likely to change?",
                options: &[
                    "Nothing else",
                    "Only your memories",
                    "Your emotions and behaviors",
                    "Other people's opinions of you",
                ],
                answer: 2,
            },
        ],
    },
    Lesson {
        name: "Automatic Thoughts & Core Beliefs",
        title: "Identifying Your Thought Patterns",
        text: "Automatic thoughts are the quick, unbidden thoughts that pop up in response to \
a situation. They feel true in the moment, are rarely questioned, and are often unhelpful.

Core beliefs sit underneath them: deep, long-held ideas about yourself, other people and \
the world, such as \"I am not good enough\". Many automatic thoughts grow out of a core \
belief. A thought record helps you catch the automatic thought, weigh the evidence for and \
against it, and write a more balanced alternative.",
        quiz: &[
            QuizQuestion {
                question: "What characterizes an automatic thought?",
                options: &[
                    "It is carefully reasoned.",
                    "It is immediate, spontaneous and often unhelpful.",
                    "It only appears in dreams.",
                    "It is always positive.",
                ],
                answer: 1,
            },
            QuizQuestion {
                question: "How do core beliefs relate to automatic thoughts?",
                options: &[
                    "They are unrelated.",
                    "Core beliefs are caused by automatic thoughts.",
                    "Automatic thoughts often spring from core beliefs.",
                    "Core beliefs replace automatic thoughts.",
                ],
                answer: 2,
            },
        ],
    },
    Lesson {
        name: "Cognitive Distortions",
        title: "Common Thinking Traps",
        text: "Cognitive distortions are habitual errors in thinking. Naming them makes them \
easier to challenge. Some common ones:

* All-or-nothing thinking: seeing things in black and white categories.
* Overgeneralization: treating one bad event as a never-ending pattern.
* Mental filter: dwelling on a single negative detail.
* Fortune-telling: predicting that things will turn out badly.
* Mind reading: assuming you know what others think of you.
* Emotional reasoning: \"I feel it, so it must be true.\"
* Should statements: rigid rules about how you or others ought to behave.
* Labeling: attaching a global label to yourself after a mistake.",
        quiz: &[
            QuizQuestion {
                question: "Which distortion views things in absolute, either/or terms?",
                options: &[
                    "Mind Reading",
                    "All-or-Nothing Thinking",
                    "Labeling",
                    "Mental Filter",
                ],
                answer: 1,
            },
            QuizQuestion {
                question: "What is fortune-telling?",
                options: &[
                    "Planning ahead carefully.",
                    "Predicting, without evidence, that things will turn out badly.",
                    "Remembering past events accurately.",
                    "Asking others for advice.",
                ],
                answer: 1,
            },
            QuizQuestion {
                question: "\"I feel anxious, so this situation must be dangerous\" is an example of:",
                options: &[
                    "Should Statements",
                    "Overgeneralization",
                    "Emotional Reasoning",
                    "Labeling",
                ],
                answer: 2,
            },
        ],
    },
];

/// Looks a lesson up by its 1-based position in `LESSONS`.
pub fn lesson(number: usize) -> Option<&'static Lesson> {
    number.checked_sub(1).and_then(|index| LESSONS.get(index))
}

#[derive(Debug, PartialEq)]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
}

impl QuizScore {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.correct * 100 / self.total) as u32
    }
}

impl Lesson {
    /// Unanswered questions count as wrong.
    pub fn grade(&self, answers: &[usize]) -> QuizScore {
        let correct = self
            .quiz
            .iter()
            .zip(answers)
            .filter(|(question, answer)| question.answer == **answer)
            .count();

        QuizScore {
            correct,
            total: self.quiz.len(),
        }
    }
}
