//! Built-in content for the neural background overlay.

/// Short AI facts, cycled by point index.
pub const DEFAULT_FACTS: &[&str] = &[
    "The term 'Artificial Intelligence' was coined at Dartmouth in 1956.",
    "Perceptrons (1958) were the first mathematical models of neural networks.",
    "Google's AlphaGo stunned the world by defeating Lee Sedol in 2016.",
    "The Transformer architecture (2017) revolutionized NLP with 'Attention'.",
    "Deep Blue was the first AI to beat a reigning chess world champion in 1997.",
    "GPT-4 reportedly has over 1.7 trillion parameters.",
    "Geoffrey Hinton, the 'Godfather of AI', popularized backpropagation.",
    "The first chatbot, ELIZA (1966), parodied a Rogerian psychotherapist.",
    "Machine Learning is a subset of AI; Deep Learning is a subset of ML.",
    "Reinforcement Learning is inspired by behavioral psychology (dopamine).",
    "Generative Adversarial Networks (GANs) pit two AIs against each other.",
    "The 'Singularity' is the hypothetical point when AI surpasses human intelligence.",
    "Boston Dynamics' Atlas robot can perform parkour with human-level agility.",
    "Yann LeCun is a pioneer of Convolutional Neural Networks (CNNs).",
    "AI hallucinations occur when LLMs confidently generate false information.",
    "AlexNet (2012) kickstarted the modern Deep Learning revolution.",
    "Self-driving cars use LiDAR and Vision Transformers to navigate.",
    "The Turing Test measures a machine's ability to exhibit intelligent behavior.",
    "AlphaFold solved the 50-year-old protein folding problem in biology.",
    "OpenAI's DALL-E 2 can generate photorealistic images from text.",
    "Few-shot learning allows models to adapt with minimal examples.",
    "Gradient Descent is the optimization algorithm powering most neural nets.",
    "Moore's Law predicts the doubling of transistors every two years.",
    "The Neocognitron (1980) was the precursor to modern CNNs.",
    "LSTM networks solved the vanishing gradient problem in RNNs.",
    "BERT uses bidirectional training to understand context in NLP.",
    "Swarm Intelligence mimics the collective behavior of decentralized systems.",
    "Symbolic AI relies on high-level, human-readable representations.",
    "Connectionism models mental or behavioral phenomena as neural nets.",
    "The Chinese Room argument challenges the idea that computers 'understand'.",
    "Federated Learning trains algorithms across decentralized edge devices.",
    "Neuromorphic computing mimics the neuro-biological architecture of the brain.",
    "Stable Diffusion brings high-quality image generation to consumer GPUs.",
    "Chain-of-Thought prompting improves reasoning in Large Language Models.",
    "Zero-knowledge proofs allow verification without revealing data.",
    "Quantum Machine Learning aims to process data using quantum states.",
    "Vector databases are essential for RAG (Retrieval Augmented Generation).",
    "YOLO (You Only Look Once) revolutionized real-time object detection.",
];
